use thiserror::Error;

use crate::mode::Mode;

#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("invalid private key: expected 32 bytes, found {found}")]
    InvalidKey { found: usize },

    #[error("invalid response length {requested}: {mode} mode allows 1..={max}")]
    InvalidLength {
        requested: usize,
        mode: Mode,
        max: usize,
    },

    #[error("invalid challenge: {reason}")]
    InvalidChallenge { reason: &'static str },

    #[error("word index {index} outside the 2048-entry list")]
    WordIndexOutOfRange { index: usize },
}
