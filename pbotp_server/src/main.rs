//! Command line entry point for the pbotp responder.

mod http;
mod page;

use anyhow::{Context, Result};
use base64::{Engine as _, prelude::BASE64_URL_SAFE_NO_PAD};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use hex::FromHex;
use log::{LevelFilter, info};
use pbotp_core::{KeyAgreement, Mode, PRIVATE_KEY_BYTES, Responder};
use rand::RngCore;
use rand::rngs::OsRng;
use std::sync::Arc;
use tokio::net::TcpListener;
use zeroize::Zeroize;

#[derive(Parser)]
#[command(
    name = "pbotp",
    author,
    version,
    about = "Public-key one-time password responder"
)]
struct Cli {
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Code,
    Phrase,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Code => Mode::Numeric,
            ModeArg::Phrase => Mode::Phrase,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Serve token pages over HTTP.
    Serve {
        #[arg(long, value_name = "ADDR", env = "PBOTP_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        listen: String,
        #[arg(long, value_name = "BASE64", env = "PBOTP_PRIVKEY", hide_env_values = true)]
        privkey: String,
        #[arg(long, value_enum, env = "PBOTP_MODE", ignore_case = true)]
        mode: ModeArg,
        #[arg(long, value_name = "N", env = "PBOTP_RESPONSE_LENGTH")]
        response_length: usize,
    },
    /// Answer a single challenge and print the token to stdout.
    Respond {
        #[arg(long, value_name = "BASE64", env = "PBOTP_PRIVKEY", hide_env_values = true)]
        privkey: String,
        #[arg(long, value_enum, env = "PBOTP_MODE", ignore_case = true)]
        mode: ModeArg,
        #[arg(long, value_name = "N", env = "PBOTP_RESPONSE_LENGTH")]
        response_length: usize,
        group: String,
        node: String,
        user: String,
        /// URL-safe base64, or hex with a `hex:` prefix.
        challenge: String,
    },
    /// Generate a fresh keypair and print it in env-file form.
    Keygen,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    match cli.command {
        Commands::Serve {
            listen,
            privkey,
            mode,
            response_length,
        } => cmd_serve(listen, privkey, mode.into(), response_length).await,
        Commands::Respond {
            privkey,
            mode,
            response_length,
            group,
            node,
            user,
            challenge,
        } => cmd_respond(
            privkey,
            mode.into(),
            response_length,
            &group,
            &node,
            &user,
            &challenge,
        ),
        Commands::Keygen => cmd_keygen(),
    }
}

async fn cmd_serve(
    listen: String,
    privkey: String,
    mode: Mode,
    response_length: usize,
) -> Result<()> {
    let responder = Arc::new(build_responder(privkey, mode, response_length)?);

    let listener = TcpListener::bind(&listen)
        .await
        .with_context(|| format!("binding {listen}"))?;
    info!(
        "listening on {listen} (mode={mode}, response_length={response_length}, public_key={})",
        BASE64_URL_SAFE_NO_PAD.encode(responder.public_key())
    );

    http::serve(listener, responder).await
}

fn cmd_respond(
    privkey: String,
    mode: Mode,
    response_length: usize,
    group: &str,
    node: &str,
    user: &str,
    challenge: &str,
) -> Result<()> {
    let responder = build_responder(privkey, mode, response_length)?;
    let challenge = parse_challenge(challenge)?;
    let payload = http::context_payload(group, node, user);
    let code = responder
        .respond(&payload, &challenge)
        .context("deriving response")?;
    println!("{code}");
    Ok(())
}

fn cmd_keygen() -> Result<()> {
    let mut secret = [0u8; PRIVATE_KEY_BYTES];
    OsRng.fill_bytes(&mut secret);
    let keys = KeyAgreement::new(&secret).context("building keypair")?;

    println!("PBOTP_PRIVKEY={}", BASE64_URL_SAFE_NO_PAD.encode(secret));
    println!("# public key: {}", BASE64_URL_SAFE_NO_PAD.encode(keys.public_key()));
    secret.zeroize();
    Ok(())
}

fn build_responder(mut privkey: String, mode: Mode, response_length: usize) -> Result<Responder> {
    // The base64 text is as much key material as the decoded bytes.
    let decoded = BASE64_URL_SAFE_NO_PAD.decode(privkey.trim());
    privkey.zeroize();
    let mut key = decoded.context("decoding private key")?;
    let responder = Responder::new(&key, mode, response_length).context("building responder");
    key.zeroize();
    responder
}

fn parse_challenge(challenge: &str) -> Result<Vec<u8>> {
    if let Some(hex) = challenge.strip_prefix("hex:") {
        let bytes = Vec::from_hex(hex.trim()).context("parsing hex-encoded challenge")?;
        Ok(bytes)
    } else {
        BASE64_URL_SAFE_NO_PAD
            .decode(challenge.trim())
            .context("parsing base64-encoded challenge")
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}
