//! Error types for the SEC-DED core

use std::fmt;
use thiserror::Error;

/// Which kind of bit sequence failed a length check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitsKind {
    Data,
    Codeword,
}

impl fmt::Display for BitsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitsKind::Data => f.write_str("data"),
            BitsKind::Codeword => f.write_str("codeword"),
        }
    }
}

/// Core error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecdedError {
    #[error("Invalid data width: {width} (must be at least 1)")]
    InvalidWidth { width: i64 },

    #[error("Wrong {kind} length: expected {expected} bits, got {actual}")]
    WrongLength {
        kind: BitsKind,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid bit symbol {symbol:?} at index {index} (only '0' and '1' are allowed)")]
    InvalidSymbol { symbol: char, index: usize },

    #[error("Invalid position {position}: positions are 1-indexed")]
    InvalidPosition { position: usize },

    #[error("Error position {position} outside [1, {n}]")]
    PositionOutOfRange { position: usize, n: usize },

    #[error("Error positions must be distinct, got {position} twice")]
    DuplicatePosition { position: usize },
}

/// Result type for SEC-DED core operations
pub type Result<T> = std::result::Result<T, SecdedError>;
