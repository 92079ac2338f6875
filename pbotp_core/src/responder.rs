use blake2::Blake2sMac256;
use blake2::digest::{FixedOutput, KeyInit, Update};
use log::debug;
use std::fmt;

use crate::ecdh::{KeyAgreement, PUBLIC_KEY_BYTES};
use crate::error::ResponderError;
use crate::format::{self, DIGEST_BYTES};
use crate::mode::Mode;

/// Domain separation prefix absorbed ahead of every payload.
pub const DOMAIN_TAG: &[u8] = b"de.n621.pbotp.v2\0";

pub struct Responder {
    keys: KeyAgreement,
    mode: Mode,
    length: usize,
}

impl Responder {
    /// Builds a responder from a raw 32-byte private key. Output mode and
    /// length are fixed here for the lifetime of the responder; every
    /// `respond` call uses them unchanged.
    pub fn new(private_key: &[u8], mode: Mode, length: usize) -> Result<Self, ResponderError> {
        let keys = KeyAgreement::new(private_key)?;
        let max = mode.max_length();
        if length == 0 || length > max {
            return Err(ResponderError::InvalidLength {
                requested: length,
                mode,
                max,
            });
        }
        Ok(Self { keys, mode, length })
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_BYTES] {
        self.keys.public_key()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Derives the one-time credential for a payload/challenge pair. The
    /// same key, mode, length, payload, and challenge always produce the
    /// same string.
    pub fn respond(&self, payload: &[u8], challenge: &[u8]) -> Result<String, ResponderError> {
        let secret = self.keys.shared_secret(challenge)?;
        let digest = response_digest(&secret, payload);
        let code = match self.mode {
            Mode::Numeric => format::format_numeric(&digest, self.length),
            Mode::Phrase => format::format_phrase(&digest, self.length)?,
        };
        debug!(
            "respond mode={} length={} payload_len={}",
            self.mode,
            self.length,
            payload.len()
        );
        Ok(code)
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("public_key", &self.public_key())
            .field("mode", &self.mode)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Keyed BLAKE2s-256 over the domain tag and payload, keyed with the raw
/// agreement output.
fn response_digest(secret: &[u8; 32], payload: &[u8]) -> [u8; DIGEST_BYTES] {
    let mut mac = Blake2sMac256::new_from_slice(secret).expect("32-byte key");
    mac.update(DOMAIN_TAG);
    mac.update(payload);
    mac.finalize_fixed().into()
}
