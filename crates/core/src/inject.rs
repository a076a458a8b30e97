//! Error injection for validation scenarios
//!
//! Both injectors flip bits in a copy of the codeword. Positions are 1-indexed;
//! omitted positions are drawn from the caller's random source.

use crate::bits::Codeword;
use crate::params::CodeParameters;
use crate::position::Position;
use crate::syndrome::ensure_codeword_len;
use crate::{SecdedError, Result};
use rand::seq::index;
use rand::Rng;
use tracing::debug;

/// Flip one bit. A random position in `[1, n]` is used when `position` is `None`.
pub fn inject_single<R: Rng + ?Sized>(
    params: &CodeParameters,
    codeword: &Codeword,
    position: Option<usize>,
    rng: &mut R,
) -> Result<(Codeword, Position)> {
    ensure_codeword_len(params, codeword)?;

    let position = match position {
        Some(value) => params.position(value)?,
        None => params.position(rng.gen_range(1..=params.n()))?,
    };

    let mut corrupted = codeword.clone();
    corrupted.flip(position);
    debug!("Injected single error at position {}", position);

    Ok((corrupted, position))
}

/// Flip two distinct bits.
///
/// With both positions omitted, two distinct positions are drawn uniformly.
/// With only one given, the other is drawn from the remaining positions.
pub fn inject_double<R: Rng + ?Sized>(
    params: &CodeParameters,
    codeword: &Codeword,
    pos1: Option<usize>,
    pos2: Option<usize>,
    rng: &mut R,
) -> Result<(Codeword, (Position, Position))> {
    ensure_codeword_len(params, codeword)?;
    let n = params.n();

    let (first, second) = match (pos1, pos2) {
        (Some(a), Some(b)) => {
            let (a, b) = (params.position(a)?, params.position(b)?);
            if a == b {
                return Err(SecdedError::DuplicatePosition { position: a.get() });
            }
            (a, b)
        }
        (Some(fixed), None) | (None, Some(fixed)) => {
            let fixed = params.position(fixed)?;
            // Draw from the n-1 other positions
            let mut other = rng.gen_range(1..n);
            if other >= fixed.get() {
                other += 1;
            }
            (fixed, params.position(other)?)
        }
        (None, None) => {
            let picked = index::sample(rng, n, 2);
            (
                params.position(picked.index(0) + 1)?,
                params.position(picked.index(1) + 1)?,
            )
        }
    };

    let mut corrupted = codeword.clone();
    corrupted.flip(first);
    corrupted.flip(second);
    debug!("Injected double error at positions {} and {}", first, second);

    Ok((corrupted, (first, second)))
}
