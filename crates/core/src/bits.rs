//! Bit sequences and the codeword value type
//!
//! Data and codewords cross the API boundary as sequences of 0/1 values, or
//! as strings of `'0'`/`'1'` with the first character being the first bit.

use crate::position::Position;
use crate::{SecdedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parse a `'0'`/`'1'` string into bits. Surrounding whitespace is ignored.
pub fn parse_bits(s: &str) -> Result<Vec<u8>> {
    s.trim()
        .chars()
        .enumerate()
        .map(|(index, symbol)| match symbol {
            '0' => Ok(0),
            '1' => Ok(1),
            _ => Err(SecdedError::InvalidSymbol { symbol, index }),
        })
        .collect()
}

/// Render bits as a `'0'`/`'1'` string
pub fn format_bits(bits: &[u8]) -> String {
    bits.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect()
}

/// Reject any element that is not 0 or 1
pub fn ensure_binary(bits: &[u8]) -> Result<()> {
    match bits.iter().position(|&b| b > 1) {
        Some(index) => Err(SecdedError::InvalidSymbol {
            symbol: char::from_digit(u32::from(bits[index]), 36).unwrap_or('?'),
            index,
        }),
        None => Ok(()),
    }
}

/// Parity (XOR) of a bit slice
pub(crate) fn parity(bits: &[u8]) -> u8 {
    bits.iter().fold(0, |acc, &b| acc ^ b)
}

/// A full codeword: data bits, SEC check bits and the overall parity bit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Codeword {
    bits: Vec<u8>,
}

impl Codeword {
    /// Wrap a bit vector, validating that every element is 0 or 1
    pub fn from_bits(bits: Vec<u8>) -> Result<Self> {
        ensure_binary(&bits)?;
        Ok(Self { bits })
    }

    /// Internal constructor for bits already known to be binary
    pub(crate) fn from_binary(bits: Vec<u8>) -> Self {
        Self { bits }
    }

    pub(crate) fn len(&self) -> usize {
        self.bits.len()
    }

    /// 0-indexed view of the bits
    pub fn as_bits(&self) -> &[u8] {
        &self.bits
    }

    /// Bit at a 1-indexed position
    pub fn bit(&self, position: Position) -> Option<u8> {
        self.bits.get(position.to_index().get()).copied()
    }

    /// Invert the bit at `position`. The caller guarantees it is in range.
    pub(crate) fn flip(&mut self, position: Position) {
        self.bits[position.to_index().get()] ^= 1;
    }

    /// Positions at which two equal-length codewords differ
    pub fn diff_positions(&self, other: &Codeword) -> Vec<Position> {
        self.bits
            .iter()
            .zip(&other.bits)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .filter_map(|(i, _)| Position::new(i + 1))
            .collect()
    }
}

impl FromStr for Codeword {
    type Err = SecdedError;

    fn from_str(s: &str) -> Result<Self> {
        parse_bits(s).map(Self::from_binary)
    }
}

impl TryFrom<String> for Codeword {
    type Error = SecdedError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Codeword> for String {
    fn from(codeword: Codeword) -> Self {
        codeword.to_string()
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_bits(&self.bits))
    }
}
