//! Codeword position arithmetic
//!
//! All Hamming arithmetic works on 1-indexed [`Position`]s, while codeword
//! storage is addressed by 0-indexed [`SeqIndex`]es. The two only meet through
//! [`Position::to_index`] and [`SeqIndex::to_position`].

use crate::SecdedError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-indexed bit position inside a codeword
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Position(usize);

impl Position {
    /// Create a position, rejecting 0
    pub fn new(value: usize) -> Option<Self> {
        if value >= 1 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Raw 1-indexed value
    pub fn get(self) -> usize {
        self.0
    }

    /// Storage index of this position (`position - 1`)
    pub fn to_index(self) -> SeqIndex {
        SeqIndex(self.0 - 1)
    }

    /// Whether this position is covered by check bit `check`,
    /// i.e. bit `check` of its binary representation is set.
    pub fn is_covered_by(self, check: usize) -> bool {
        (self.0 >> check) & 1 == 1
    }

    /// Iterate positions `1..=last`
    pub fn range_to(last: usize) -> impl Iterator<Item = Position> {
        (1..=last).map(Position)
    }
}

impl TryFrom<usize> for Position {
    type Error = SecdedError;

    fn try_from(value: usize) -> Result<Self, SecdedError> {
        Position::new(value).ok_or(SecdedError::InvalidPosition { position: value })
    }
}

impl From<Position> for usize {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 0-indexed offset into codeword storage. Only obtainable from a [`Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeqIndex(usize);

impl SeqIndex {
    pub fn get(self) -> usize {
        self.0
    }

    /// Position addressed by this index (`index + 1`)
    pub fn to_position(self) -> Position {
        Position(self.0 + 1)
    }
}

impl fmt::Display for SeqIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_rejects_zero() {
        assert!(Position::new(0).is_none());
        assert_eq!(Position::new(1).unwrap().get(), 1);
    }

    #[test]
    fn test_index_conversion() {
        let pos = Position::new(5).unwrap();
        assert_eq!(pos.to_index().get(), 4);
        assert_eq!(pos.to_index().to_position(), pos);
        assert_eq!(Position::new(1).unwrap().to_index().get(), 0);
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Position>("0").is_err());
        let pos: Position = serde_json::from_str("7").unwrap();
        assert_eq!(pos.get(), 7);
        assert_eq!(serde_json::to_string(&pos).unwrap(), "7");
    }

    #[test]
    fn test_try_from_usize() {
        assert_eq!(
            Position::try_from(0usize),
            Err(SecdedError::InvalidPosition { position: 0 })
        );
        assert_eq!(Position::try_from(3usize).unwrap().get(), 3);
    }

    #[test]
    fn test_coverage() {
        // 6 = 0b110
        let pos = Position::new(6).unwrap();
        assert!(!pos.is_covered_by(0));
        assert!(pos.is_covered_by(1));
        assert!(pos.is_covered_by(2));
        assert!(!pos.is_covered_by(3));
    }

    #[test]
    fn test_range_to() {
        let values: Vec<usize> = Position::range_to(4).map(Position::get).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }
}
