//! Error types for names and the action-data codec

use thiserror::Error;

/// Errors produced while parsing a [`Name`](crate::Name) from text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    /// More than 13 characters
    #[error("Name too long: {0} characters (max 13)")]
    TooLong(usize),

    /// Character outside `.12345a-z`
    #[error("Invalid character {ch:?} at position {position}")]
    InvalidChar {
        /// The offending character
        ch: char,
        /// Zero-based position in the input
        position: usize,
    },

    /// The 13th character only has 4 bits of room
    #[error("Invalid 13th character {0:?}: must be '.' or 'a'-'j'")]
    InvalidLastChar(char),

    /// A non-empty name made only of dots
    #[error("Name must contain at least one non-dot character")]
    OnlyDots,
}

/// Errors produced while decoding action data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended before the value was complete
    #[error("Unexpected end of input: need {needed} bytes, {remaining} remaining")]
    UnexpectedEnd {
        /// Bytes required by the next field
        needed: usize,
        /// Bytes left in the input
        remaining: usize,
    },

    /// A bool byte other than 0 or 1
    #[error("Invalid bool byte: {0:#04x}")]
    InvalidBool(u8),

    /// Varuint32 longer than 5 bytes or above u32::MAX
    #[error("Varuint32 overflow")]
    VarUintOverflow,

    /// String payload is not UTF-8
    #[error("Invalid UTF-8 string")]
    InvalidUtf8,

    /// Bytes left over after decoding a complete value
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}
