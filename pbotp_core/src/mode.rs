use std::fmt;

/// Ceiling for numeric output so `10^length` stays inside `u64`.
pub const MAX_NUMERIC_DIGITS: usize = 19;
/// Ceiling for phrase output so `length * 11` bits fit in a 256-bit digest.
pub const MAX_PHRASE_WORDS: usize = 23;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Numeric,
    Phrase,
}

impl Mode {
    pub fn max_length(self) -> usize {
        match self {
            Mode::Numeric => MAX_NUMERIC_DIGITS,
            Mode::Phrase => MAX_PHRASE_WORDS,
        }
    }

    /// Wire name of the mode; numeric output is spelled `code` in
    /// configuration and markup.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Numeric => "code",
            Mode::Phrase => "phrase",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
