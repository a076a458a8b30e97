//! SEC-DED encoder

use crate::bits::{ensure_binary, parity, Codeword};
use crate::error::BitsKind;
use crate::params::CodeParameters;
use crate::syndrome::check_parity;
use crate::{SecdedError, Result};
use tracing::debug;

/// Encode `k` data bits into an `n`-bit codeword.
///
/// The first data bit lands in the lowest-numbered data position, so callers
/// that pass data most-significant-first get it back in the same order from
/// [`crate::decoder::decode`].
pub fn encode(params: &CodeParameters, data: &[u8]) -> Result<Codeword> {
    if data.len() != params.k() {
        return Err(SecdedError::WrongLength {
            kind: BitsKind::Data,
            expected: params.k(),
            actual: data.len(),
        });
    }
    ensure_binary(data)?;

    let mut bits = vec![0u8; params.n()];

    for (&bit, pos) in data.iter().zip(params.data_positions()) {
        bits[pos.to_index().get()] = bit;
    }

    let sec_end = params.sec_end();
    for (check, &pos) in params.sec_parity_positions().iter().enumerate() {
        bits[pos.to_index().get()] = check_parity(&bits, check, sec_end, Some(pos));
    }

    // Overall parity covers every position before it
    let overall = parity(&bits[..sec_end]);
    bits[params.overall_parity_position().to_index().get()] = overall;

    let codeword = Codeword::from_binary(bits);
    debug!("Encoded {} data bits into {} codeword {}", params.k(), params, codeword);

    Ok(codeword)
}
