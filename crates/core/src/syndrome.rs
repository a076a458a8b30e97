//! Syndrome and overall-parity evaluation

use crate::bits::{parity, Codeword};
use crate::error::BitsKind;
use crate::params::CodeParameters;
use crate::position::Position;
use crate::{SecdedError, Result};
use serde::Serialize;

/// Raw diagnostics of a received codeword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SyndromeReport {
    /// 0 if every SEC check passes, otherwise the 1-indexed position named by the failing checks
    pub syndrome: usize,
    /// Whether the bit at position n matches the parity of positions `[1, n-1]`
    pub overall_parity_ok: bool,
}

/// XOR of every position in `[1, sec_end]` covered by check bit `check`,
/// optionally leaving one position out.
pub(crate) fn check_parity(bits: &[u8], check: usize, sec_end: usize, skip: Option<Position>) -> u8 {
    Position::range_to(sec_end)
        .filter(|&pos| pos.is_covered_by(check) && Some(pos) != skip)
        .fold(0, |acc, pos| acc ^ bits[pos.to_index().get()])
}

pub(crate) fn ensure_codeword_len(params: &CodeParameters, received: &Codeword) -> Result<()> {
    if received.len() != params.n() {
        return Err(SecdedError::WrongLength {
            kind: BitsKind::Codeword,
            expected: params.n(),
            actual: received.len(),
        });
    }
    Ok(())
}

/// Compute the SEC syndrome and the overall-parity check of `received`
pub fn evaluate(params: &CodeParameters, received: &Codeword) -> Result<SyndromeReport> {
    ensure_codeword_len(params, received)?;

    let bits = received.as_bits();
    let sec_end = params.sec_end();

    let syndrome = (0..params.p_sec())
        .filter(|&check| check_parity(bits, check, sec_end, None) != 0)
        .fold(0usize, |acc, check| acc | (1 << check));

    let overall_index = params.overall_parity_position().to_index().get();
    let overall_parity_ok = parity(&bits[..sec_end]) == bits[overall_index];

    Ok(SyndromeReport {
        syndrome,
        overall_parity_ok,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use quickcheck_macros::quickcheck;

    fn k8() -> CodeParameters {
        CodeParameters::derive(8).unwrap()
    }

    #[test]
    fn test_clean_codeword() {
        let params = k8();
        let cw = encode(&params, &[1, 1, 0, 1, 0, 0, 1, 0]).unwrap();
        let report = evaluate(&params, &cw).unwrap();
        assert_eq!(report.syndrome, 0);
        assert!(report.overall_parity_ok);
    }

    #[test]
    fn test_single_flip_names_position() {
        let params = k8();
        let cw = encode(&params, &[1, 1, 0, 1, 0, 0, 1, 0]).unwrap();
        for pos in 1..params.n() {
            let mut corrupted = cw.clone();
            corrupted.flip(Position::new(pos).unwrap());
            let report = evaluate(&params, &corrupted).unwrap();
            assert_eq!(report.syndrome, pos);
            assert!(!report.overall_parity_ok);
        }
    }

    #[test]
    fn test_overall_parity_flip() {
        let params = k8();
        let mut cw = encode(&params, &[0; 8]).unwrap();
        cw.flip(params.overall_parity_position());
        let report = evaluate(&params, &cw).unwrap();
        assert_eq!(report.syndrome, 0);
        assert!(!report.overall_parity_ok);
    }

    #[test]
    fn test_wrong_length() {
        let params = k8();
        let cw: Codeword = "010101".parse().unwrap();
        assert_eq!(
            evaluate(&params, &cw),
            Err(SecdedError::WrongLength {
                kind: BitsKind::Codeword,
                expected: 13,
                actual: 6,
            })
        );
    }

    #[quickcheck]
    fn prop_evaluation_is_idempotent(bits: Vec<bool>) -> bool {
        let params = k8();
        let mut raw: Vec<u8> = bits.into_iter().map(u8::from).collect();
        raw.resize(params.n(), 0);
        let cw = Codeword::from_bits(raw).unwrap();
        evaluate(&params, &cw) == evaluate(&params, &cw)
    }
}
