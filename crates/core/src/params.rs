//! Code parameter derivation
//!
//! Given a data width `k`, derive the smallest SEC check-bit count and the
//! full position layout of the extended Hamming codeword.

use crate::position::Position;
use crate::{SecdedError, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Role of a position within the codeword layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BitRole {
    /// SEC check bit at a power-of-two position
    SecParity,
    /// Data bit
    Data,
    /// Overall (DED) parity bit at position n
    OverallParity,
}

impl BitRole {
    /// Short label used in layout listings
    pub fn label(&self) -> &'static str {
        match self {
            BitRole::SecParity => "Ps",
            BitRole::Data => "D",
            BitRole::OverallParity => "Po",
        }
    }
}

/// Immutable layout of an extended Hamming (n,k) SEC-DED code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CodeParameters {
    k: usize,
    p_sec: usize,
    n: usize,
    sec_parity_positions: Vec<Position>,
    data_positions: Vec<Position>,
    overall_parity_position: Position,
}

impl CodeParameters {
    /// Derive the code layout for `k` data bits
    pub fn derive(k: usize) -> Result<Self> {
        if k < 1 {
            return Err(SecdedError::InvalidWidth { width: 0 });
        }

        // Widths whose layout does not fit in usize are rejected
        let too_wide = || SecdedError::InvalidWidth {
            width: i64::try_from(k).unwrap_or(i64::MAX),
        };

        let mut p_sec = 0usize;
        let n = loop {
            let n = k.checked_add(p_sec + 1).ok_or_else(too_wide)?;
            let shift = u32::try_from(p_sec).map_err(|_| too_wide())?;
            let patterns = 1usize.checked_shl(shift).ok_or_else(too_wide)?;
            if patterns >= n {
                break n;
            }
            p_sec += 1;
        };
        let sec_end = n - 1;

        let sec_parity_positions: Vec<Position> = (0..p_sec)
            .filter_map(|i| Position::new(1 << i))
            .collect();

        let data_positions: Vec<Position> = Position::range_to(sec_end)
            .filter(|pos| !pos.get().is_power_of_two())
            .collect();

        let overall_parity_position = Position::new(n).ok_or_else(too_wide)?;

        debug!(
            "Derived ({},{}) SEC-DED code: p_sec={}, data positions={}",
            n,
            k,
            p_sec,
            data_positions.len()
        );

        Ok(Self {
            k,
            p_sec,
            n,
            sec_parity_positions,
            data_positions,
            overall_parity_position,
        })
    }

    /// Number of data bits
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of SEC check bits
    pub fn p_sec(&self) -> usize {
        self.p_sec
    }

    /// Total redundancy bits (SEC check bits plus the overall parity bit)
    pub fn p_ded(&self) -> usize {
        self.p_sec + 1
    }

    /// Codeword length
    pub fn n(&self) -> usize {
        self.n
    }

    /// Last position covered by the SEC checks (`k + p_sec`, i.e. `n - 1`)
    pub fn sec_end(&self) -> usize {
        self.n - 1
    }

    pub fn sec_parity_positions(&self) -> &[Position] {
        &self.sec_parity_positions
    }

    /// Data positions in ascending order; the i-th data bit lives at the i-th entry
    pub fn data_positions(&self) -> &[Position] {
        &self.data_positions
    }

    pub fn overall_parity_position(&self) -> Position {
        self.overall_parity_position
    }

    /// Same as [`CodeParameters::p_ded`]
    pub fn redundancy_bits(&self) -> usize {
        self.p_ded()
    }

    /// Code rate k/n
    pub fn code_rate(&self) -> f64 {
        self.k as f64 / self.n as f64
    }

    /// Whether a raw 1-indexed value addresses a bit of this code
    pub fn contains(&self, position: usize) -> bool {
        (1..=self.n).contains(&position)
    }

    /// Validate a raw 1-indexed value against `[1, n]`
    pub fn position(&self, position: usize) -> Result<Position> {
        if self.contains(position) {
            Position::new(position).ok_or(SecdedError::PositionOutOfRange { position, n: self.n })
        } else {
            Err(SecdedError::PositionOutOfRange { position, n: self.n })
        }
    }

    /// Role of a position, or `None` outside `[1, n]`
    pub fn role_of(&self, position: Position) -> Option<BitRole> {
        let value = position.get();
        if value == self.n {
            Some(BitRole::OverallParity)
        } else if value > self.n {
            None
        } else if value.is_power_of_two() {
            Some(BitRole::SecParity)
        } else {
            Some(BitRole::Data)
        }
    }

    /// Roles of all positions `1..=n` in order
    pub fn layout(&self) -> Vec<(Position, BitRole)> {
        Position::range_to(self.n)
            .filter_map(|pos| self.role_of(pos).map(|role| (pos, role)))
            .collect()
    }
}

impl TryFrom<i64> for CodeParameters {
    type Error = SecdedError;

    fn try_from(width: i64) -> Result<Self> {
        match usize::try_from(width) {
            Ok(k) if k >= 1 => Self::derive(k),
            _ => Err(SecdedError::InvalidWidth { width }),
        }
    }
}

impl fmt::Display for CodeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.n, self.k)
    }
}
