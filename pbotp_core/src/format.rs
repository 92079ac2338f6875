//! Digest-to-text encoders for the two output modes.
//!
//! Both encoders consume the 32-byte response digest and the length fixed
//! at responder construction. The numeric encoder reduces the first eight
//! digest bytes modulo a power of ten; the phrase encoder walks the digest
//! as one little-endian 256-bit integer in 11-bit windows through the
//! BIP-39 English word list, lowest bits first.

use bip39::Language;

use crate::error::ResponderError;
use crate::mode::{MAX_NUMERIC_DIGITS, MAX_PHRASE_WORDS};

pub const DIGEST_BYTES: usize = 32;

const GROUP_CANDIDATES: [usize; 3] = [5, 4, 3];
const WORD_INDEX_BITS: u32 = 11;
const WORD_INDEX_MASK: u32 = (1 << WORD_INDEX_BITS) - 1;

/// Formats the digest as exactly `length` zero-padded decimal digits,
/// space-grouped by the first of 5, 4, or 3 that divides `length` evenly.
/// When none divides, the digits stay ungrouped. `length` must be in
/// `1..=19`; the responder enforces this at construction.
pub fn format_numeric(digest: &[u8; DIGEST_BYTES], length: usize) -> String {
    debug_assert!((1..=MAX_NUMERIC_DIGITS).contains(&length));

    let mut lane = [0u8; 8];
    lane.copy_from_slice(&digest[..8]);
    let value = u64::from_le_bytes(lane) % 10u64.pow(length as u32);
    let raw = format!("{value:0length$}");

    let group = match GROUP_CANDIDATES.iter().copied().find(|&g| length % g == 0) {
        Some(group) => group,
        None => return raw,
    };

    let mut grouped = String::with_capacity(length + length / group);
    for (i, digit) in raw.chars().enumerate() {
        if i > 0 && (length - i) % group == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats the digest as exactly `length` BIP-39 English words joined by
/// single spaces. The first word comes from the lowest 11 bits of the
/// digest read little-endian. `length` must be in `1..=23`; the responder
/// enforces this at construction.
pub fn format_phrase(
    digest: &[u8; DIGEST_BYTES],
    length: usize,
) -> Result<String, ResponderError> {
    debug_assert!((1..=MAX_PHRASE_WORDS).contains(&length));

    let word_list = Language::English.word_list();
    let mut words = Vec::with_capacity(length);
    let mut acc: u32 = 0;
    let mut acc_bits: u32 = 0;
    let mut next_byte = 0usize;

    for _ in 0..length {
        while acc_bits < WORD_INDEX_BITS && next_byte < DIGEST_BYTES {
            acc |= u32::from(digest[next_byte]) << acc_bits;
            acc_bits += 8;
            next_byte += 1;
        }
        let index = (acc & WORD_INDEX_MASK) as usize;
        let word = word_list
            .get(index)
            .copied()
            .ok_or(ResponderError::WordIndexOutOfRange { index })?;
        words.push(word);
        acc >>= WORD_INDEX_BITS;
        acc_bits = acc_bits.saturating_sub(WORD_INDEX_BITS);
    }

    Ok(words.join(" "))
}
