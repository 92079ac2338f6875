//! Responder core for pbotp v2: deterministic one-time login tokens bound
//! to an X25519 key pair, a caller challenge, and a request context.
//!
//! The library performs no I/O. Key loading, transport, and presentation
//! live in the `pbotp_server` binary.

pub mod ecdh;
pub mod error;
pub mod format;
pub mod mode;
pub mod responder;

pub use crate::ecdh::{KeyAgreement, PRIVATE_KEY_BYTES, PUBLIC_KEY_BYTES};
pub use crate::error::ResponderError;
pub use crate::format::{DIGEST_BYTES, format_numeric, format_phrase};
pub use crate::mode::{MAX_NUMERIC_DIGITS, MAX_PHRASE_WORDS, Mode};
pub use crate::responder::{DOMAIN_TAG, Responder};
