//! SEC-DED decoder
//!
//! Decoding is a one-shot mapping from a [`SyndromeReport`] to a
//! [`Classification`], followed by at most one bit flip on a working copy of
//! the received codeword and extraction of the data positions.

use crate::bits::Codeword;
use crate::params::CodeParameters;
use crate::position::Position;
use crate::syndrome::{evaluate, SyndromeReport};
use crate::Result;
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome class of a single decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// Syndrome 0 and overall parity consistent
    NoError,
    /// Only the overall parity bit was wrong; it has been flipped back
    SingleErrorOverallParity,
    /// One bit in `[1, n-1]` was wrong and has been corrected
    SingleErrorCorrected { position: Position },
    /// Nonzero syndrome with consistent overall parity
    DoubleErrorDetected { syndrome: usize },
    /// Odd error weight with a syndrome outside `[1, n-1]`.
    /// Only reachable with three or more flipped bits.
    UncorrectableAnomaly { syndrome: usize },
}

impl Classification {
    /// Numeric status: 0 no error, 1 corrected, 2 uncorrectable, 3 overall parity corrected
    pub fn status_code(&self) -> u8 {
        match self {
            Classification::NoError => 0,
            Classification::SingleErrorCorrected { .. } => 1,
            Classification::DoubleErrorDetected { .. } | Classification::UncorrectableAnomaly { .. } => 2,
            Classification::SingleErrorOverallParity => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Classification::NoError => "no error",
            Classification::SingleErrorOverallParity => "single error (overall parity)",
            Classification::SingleErrorCorrected { .. } => "single error corrected",
            Classification::DoubleErrorDetected { .. } => "double error detected",
            Classification::UncorrectableAnomaly { .. } => "uncorrectable anomaly",
        }
    }

    /// Whether the extracted data can be trusted
    pub fn is_data_reliable(&self) -> bool {
        matches!(
            self,
            Classification::NoError
                | Classification::SingleErrorOverallParity
                | Classification::SingleErrorCorrected { .. }
        )
    }

    pub fn is_single_error(&self) -> bool {
        matches!(
            self,
            Classification::SingleErrorOverallParity | Classification::SingleErrorCorrected { .. }
        )
    }

    /// Position flipped by the decoder, if any
    pub fn corrected_position(&self, params: &CodeParameters) -> Option<Position> {
        match self {
            Classification::SingleErrorOverallParity => Some(params.overall_parity_position()),
            Classification::SingleErrorCorrected { position } => Some(*position),
            _ => None,
        }
    }
}

/// Result of decoding one received codeword
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeOutcome {
    /// Extracted data bits, in the original input order.
    /// Unreliable unless [`DecodeOutcome::is_data_reliable`] holds.
    pub data: Vec<u8>,
    pub classification: Classification,
    pub diagnosis: String,
    pub report: SyndromeReport,
    /// Received codeword after any correction
    pub corrected: Codeword,
}

impl DecodeOutcome {
    pub fn is_data_reliable(&self) -> bool {
        self.classification.is_data_reliable()
    }
}

/// Map a syndrome report onto its classification
pub fn classify(params: &CodeParameters, report: SyndromeReport) -> Classification {
    match (report.syndrome, report.overall_parity_ok) {
        (0, true) => Classification::NoError,
        (0, false) => Classification::SingleErrorOverallParity,
        (syndrome, false) => match Position::new(syndrome) {
            Some(position) if syndrome < params.n() => {
                Classification::SingleErrorCorrected { position }
            }
            _ => Classification::UncorrectableAnomaly { syndrome },
        },
        (syndrome, true) => Classification::DoubleErrorDetected { syndrome },
    }
}

fn diagnose(params: &CodeParameters, classification: Classification) -> String {
    match classification {
        Classification::NoError => "No error detected.".to_string(),
        Classification::SingleErrorOverallParity => {
            let pos = params.overall_parity_position();
            format!(
                "Single error in overall parity bit (position {}, 0-indexed: {}) corrected.",
                pos,
                pos.to_index()
            )
        }
        Classification::SingleErrorCorrected { position } => format!(
            "Single error at position {} (0-indexed: {}) corrected.",
            position,
            position.to_index()
        ),
        Classification::DoubleErrorDetected { syndrome } => format!(
            "Double error detected (syndrome {}, overall parity OK). Uncorrectable; extracted data is unreliable.",
            syndrome
        ),
        Classification::UncorrectableAnomaly { syndrome } => format!(
            "Uncorrectable error (syndrome {} outside SEC range [1, {}] with overall parity mismatch).",
            syndrome,
            params.sec_end()
        ),
    }
}

/// Decode a received codeword. The input is left untouched.
pub fn decode(params: &CodeParameters, received: &Codeword) -> Result<DecodeOutcome> {
    let report = evaluate(params, received)?;
    let classification = classify(params, report);

    let mut corrected = received.clone();
    if let Some(pos) = classification.corrected_position(params) {
        corrected.flip(pos);
    }

    if let Classification::UncorrectableAnomaly { syndrome } = classification {
        warn!(
            "Syndrome {} outside SEC range [1, {}] for {} code",
            syndrome,
            params.sec_end(),
            params
        );
    }

    let data: Vec<u8> = params
        .data_positions()
        .iter()
        .map(|&pos| corrected.as_bits()[pos.to_index().get()])
        .collect();

    let diagnosis = diagnose(params, classification);
    debug!(
        "Decoded {}: syndrome={}, overall_parity_ok={}, {}",
        received,
        report.syndrome,
        report.overall_parity_ok,
        classification.label()
    );

    Ok(DecodeOutcome {
        data,
        classification,
        diagnosis,
        report,
        corrected,
    })
}
