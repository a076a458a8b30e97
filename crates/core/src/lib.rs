//! SEC-DED Core - extended Hamming codes over fixed-width data blocks
//!
//! This crate derives the (n,k) layout for a data width, encodes data into
//! codewords, evaluates syndromes, classifies and corrects errors, and
//! injects errors for validation.

pub mod bits;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod inject;
pub mod params;
pub mod position;
pub mod scenario;
pub mod syndrome;

pub use error::{SecdedError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        bits::{format_bits, parse_bits, Codeword},
        decoder::{classify, decode, Classification, DecodeOutcome},
        encoder::encode,
        error::{BitsKind, SecdedError, Result},
        inject::{inject_double, inject_single},
        params::{BitRole, CodeParameters},
        position::{Position, SeqIndex},
        scenario::{run_scenario, sweep, CaseKind, Scenario, ScenarioReport, SweepSummary},
        syndrome::{evaluate, SyndromeReport},
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_values_are_thread_safe() {
        assert_send_sync::<CodeParameters>();
        assert_send_sync::<Codeword>();
        assert_send_sync::<DecodeOutcome>();
    }

    #[test]
    fn test_shared_params_across_threads() {
        let params = CodeParameters::derive(32).unwrap();
        std::thread::scope(|s| {
            for seed in 0..4u8 {
                let params = &params;
                s.spawn(move || {
                    let data: Vec<u8> = (0..32).map(|i| ((i + seed) % 2) as u8).collect();
                    let cw = encode(params, &data).unwrap();
                    assert_eq!(decode(params, &cw).unwrap().data, data);
                });
            }
        });
    }

    #[test]
    fn test_string_interface() {
        let params = CodeParameters::derive(8).unwrap();
        let data = parse_bits("11010010").unwrap();
        let cw = encode(&params, &data).unwrap();
        let received: Codeword = cw.to_string().parse().unwrap();
        let outcome = decode(&params, &received).unwrap();
        assert_eq!(format_bits(&outcome.data), "11010010");
    }
}
