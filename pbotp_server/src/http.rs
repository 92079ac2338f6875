//! Minimal HTTP/1.1 front end for the responder.
//!
//! The protocol surface is a single GET route plus a banner, so this
//! speaks just enough HTTP for that: one request line, drained headers,
//! one `Connection: close` reply per connection.

use anyhow::{Context, Result};
use base64::{Engine as _, prelude::BASE64_URL_SAFE_NO_PAD};
use log::{debug, warn};
use pbotp_core::{Responder, ResponderError};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};

use crate::page;

/// Upper bound on request line plus headers per connection.
const MAX_REQUEST_BYTES: u64 = 8 * 1024;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const TEXT_HTML: &str = "text/html; charset=utf-8";

struct Reply {
    status: u16,
    reason: &'static str,
    content_type: &'static str,
    body: String,
}

fn text_reply(status: u16, reason: &'static str, body: &str) -> Reply {
    Reply {
        status,
        reason,
        content_type: TEXT_PLAIN,
        body: body.to_string(),
    }
}

/// Accepts connections forever, one task per client.
pub async fn serve(listener: TcpListener, responder: Arc<Responder>) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await.context("accepting connection")?;
        let responder = Arc::clone(&responder);
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, &responder).await {
                warn!("client {peer}: {err:#}");
            }
        });
    }
}

async fn handle_connection(stream: TcpStream, responder: &Responder) -> Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half.take(MAX_REQUEST_BYTES));

    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .context("reading request line")?;

    let mut parts = request_line.split_whitespace();
    let (method, target) = match (parts.next(), parts.next()) {
        (Some(method), Some(target)) => (method.to_string(), target.to_string()),
        _ => {
            let reply = text_reply(400, "Bad Request", "malformed request line\n");
            return write_reply(&mut write_half, &reply).await;
        }
    };

    // Drain headers; the reply does not depend on any of them.
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).await.context("reading header")?;
        if n == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }

    let reply = respond_to(responder, &method, &target);
    debug!("{method} {target} -> {}", reply.status);
    write_reply(&mut write_half, &reply).await
}

/// Maps one request to a reply. Synchronous and socket-free so the
/// whole routing table is unit-testable.
fn respond_to(responder: &Responder, method: &str, target: &str) -> Reply {
    if method != "GET" {
        return text_reply(405, "Method Not Allowed", "method not allowed\n");
    }

    let path = target.split('?').next().unwrap_or("");
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        let public_key = BASE64_URL_SAFE_NO_PAD.encode(responder.public_key());
        return text_reply(200, "OK", &format!("pbotp v2\npublic key: {public_key}\n"));
    }

    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments.len() != 4 {
        return text_reply(404, "Not Found", "not found\n");
    }

    // Decoding after the split keeps an escaped slash inside its segment.
    let decoded = match segments
        .iter()
        .map(|segment| percent_decode(segment))
        .collect::<Option<Vec<_>>>()
    {
        Some(decoded) => decoded,
        None => return text_reply(400, "Bad Request", "invalid path encoding\n"),
    };
    let (group, node, user, challenge_b64) = (&decoded[0], &decoded[1], &decoded[2], &decoded[3]);

    let challenge = match BASE64_URL_SAFE_NO_PAD.decode(challenge_b64) {
        Ok(challenge) => challenge,
        Err(_) => return text_reply(400, "Bad Request", "invalid challenge encoding\n"),
    };

    let payload = context_payload(group, node, user);
    match responder.respond(&payload, &challenge) {
        Ok(code) => Reply {
            status: 200,
            reason: "OK",
            content_type: TEXT_HTML,
            body: page::render_token_page(node, &code, responder.mode()),
        },
        Err(err @ ResponderError::InvalidChallenge { .. }) => {
            text_reply(400, "Bad Request", &format!("{err}\n"))
        }
        Err(err) => {
            warn!("token request for {node} failed: {err}");
            text_reply(500, "Internal Server Error", "internal error\n")
        }
    }
}

/// Serializes the identity triple the way responder peers expect it:
/// every field NUL-terminated, in group, node, user order.
pub fn context_payload(group: &str, node: &str, user: &str) -> Vec<u8> {
    let mut payload = Vec::with_capacity(group.len() + node.len() + user.len() + 3);
    for part in [group, node, user] {
        payload.extend_from_slice(part.as_bytes());
        payload.push(0);
    }
    payload
}

/// Decodes `%XX` escapes in one path segment. `+` stays literal, this
/// is a path, not a query string.
fn percent_decode(segment: &str) -> Option<String> {
    let bytes = segment.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            decoded.push(hi << 4 | lo);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

async fn write_reply(write_half: &mut OwnedWriteHalf, reply: &Reply) -> Result<()> {
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reply.status,
        reply.reason,
        reply.content_type,
        reply.body.len()
    );
    write_half
        .write_all(head.as_bytes())
        .await
        .context("writing response head")?;
    write_half
        .write_all(reply.body.as_bytes())
        .await
        .context("writing response body")?;
    write_half.shutdown().await.context("closing connection")
}
