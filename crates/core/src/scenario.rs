//! Validation scenarios
//!
//! Drive the encoder, injector and decoder together and check that every
//! decode lands in the expected classification.

use crate::bits::Codeword;
use crate::decoder::{decode, Classification, DecodeOutcome};
use crate::encoder::encode;
use crate::inject::{inject_double, inject_single};
use crate::params::CodeParameters;
use crate::position::Position;
use crate::Result;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

/// Which cases a scenario run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    NoError,
    SingleError,
    DoubleError,
    All,
}

impl Scenario {
    fn includes(self, kind: CaseKind) -> bool {
        match self {
            Scenario::All => true,
            Scenario::NoError => kind == CaseKind::NoError,
            Scenario::SingleError => kind == CaseKind::SingleError,
            Scenario::DoubleError => kind == CaseKind::DoubleError,
        }
    }
}

/// Kind of corruption applied in a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    NoError,
    SingleError,
    DoubleError,
}

impl CaseKind {
    /// Pass criterion for a decode of this kind of corruption
    pub fn accepts(self, outcome: &DecodeOutcome, data: &[u8]) -> bool {
        match self {
            CaseKind::NoError => outcome.classification == Classification::NoError && outcome.data == data,
            CaseKind::SingleError => outcome.classification.is_single_error() && outcome.data == data,
            CaseKind::DoubleError => {
                matches!(outcome.classification, Classification::DoubleErrorDetected { .. })
            }
        }
    }
}

/// One injected-and-decoded case
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioCase {
    pub kind: CaseKind,
    pub injected: Vec<Position>,
    pub corrupted: Codeword,
    pub outcome: DecodeOutcome,
    pub passed: bool,
}

/// Result of [`run_scenario`]
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub code: String,
    pub data: Vec<u8>,
    pub codeword: Codeword,
    pub cases: Vec<ScenarioCase>,
}

impl ScenarioReport {
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(|case| case.passed)
    }
}

/// Encode `data` and run the selected cases against it
pub fn run_scenario<R: Rng + ?Sized>(
    params: &CodeParameters,
    data: &[u8],
    scenario: Scenario,
    rng: &mut R,
) -> Result<ScenarioReport> {
    let codeword = encode(params, data)?;
    let mut cases = Vec::new();

    if scenario.includes(CaseKind::NoError) {
        cases.push(run_case(params, data, CaseKind::NoError, codeword.clone(), Vec::new())?);
    }

    if scenario.includes(CaseKind::SingleError) {
        let (corrupted, pos) = inject_single(params, &codeword, None, rng)?;
        cases.push(run_case(params, data, CaseKind::SingleError, corrupted, vec![pos])?);
    }

    if scenario.includes(CaseKind::DoubleError) {
        let (corrupted, (p1, p2)) = inject_double(params, &codeword, None, None, rng)?;
        cases.push(run_case(params, data, CaseKind::DoubleError, corrupted, vec![p1, p2])?);
    }

    let report = ScenarioReport {
        code: params.to_string(),
        data: data.to_vec(),
        codeword,
        cases,
    };
    info!(
        "Scenario {:?} on {} code: {}",
        scenario,
        params,
        if report.all_passed() { "passed" } else { "FAILED" }
    );

    Ok(report)
}

fn run_case(
    params: &CodeParameters,
    data: &[u8],
    kind: CaseKind,
    corrupted: Codeword,
    injected: Vec<Position>,
) -> Result<ScenarioCase> {
    let outcome = decode(params, &corrupted)?;
    let passed = kind.accepts(&outcome, data);
    debug!("{:?} case at {:?}: {}", kind, injected, outcome.classification.label());
    Ok(ScenarioCase {
        kind,
        injected,
        corrupted,
        outcome,
        passed,
    })
}

/// Pass/fail tally for one kind of corruption
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
}

impl Tally {
    fn record(&mut self, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

/// Result of [`sweep`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    pub single: Tally,
    pub double: Tally,
    /// Injected positions whose decode did not meet the pass criterion
    pub failures: Vec<Vec<Position>>,
}

impl SweepSummary {
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Flip every single position and every unordered pair of positions of the
/// encoded `data`, decoding each result.
pub fn sweep(params: &CodeParameters, data: &[u8]) -> Result<SweepSummary> {
    let codeword = encode(params, data)?;
    let mut summary = SweepSummary::default();

    for p in Position::range_to(params.n()) {
        let mut corrupted = codeword.clone();
        corrupted.flip(p);
        let passed = CaseKind::SingleError.accepts(&decode(params, &corrupted)?, data);
        summary.single.record(passed);
        if !passed {
            summary.failures.push(vec![p]);
        }
    }

    for p1 in Position::range_to(params.n()) {
        for p2 in Position::range_to(params.n()).filter(|&p| p > p1) {
            let mut corrupted = codeword.clone();
            corrupted.flip(p1);
            corrupted.flip(p2);
            let passed = CaseKind::DoubleError.accepts(&decode(params, &corrupted)?, data);
            summary.double.record(passed);
            if !passed {
                summary.failures.push(vec![p1, p2]);
            }
        }
    }

    info!(
        "Sweep of {} code: {}/{} single, {}/{} double passed",
        params,
        summary.single.passed,
        summary.single.total(),
        summary.double.passed,
        summary.double.total()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::parse_bits;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_all_scenarios_pass() {
        let params = CodeParameters::derive(16).unwrap();
        let data = parse_bits("1011001110001111").unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..50 {
            let report = run_scenario(&params, &data, Scenario::All, &mut rng).unwrap();
            assert_eq!(report.cases.len(), 3);
            assert!(report.all_passed(), "{:?}", report);
        }
    }

    #[test]
    fn test_single_scenario_only() {
        let params = CodeParameters::derive(8).unwrap();
        let data = parse_bits("11010010").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let report = run_scenario(&params, &data, Scenario::SingleError, &mut rng).unwrap();
        assert_eq!(report.code, "(13,8)");
        assert_eq!(report.cases.len(), 1);
        let case = &report.cases[0];
        assert_eq!(case.kind, CaseKind::SingleError);
        assert_eq!(case.injected.len(), 1);
        assert!(case.passed);
    }

    #[test]
    fn test_double_case_data_not_trusted() {
        let params = CodeParameters::derive(8).unwrap();
        let data = parse_bits("00000000").unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let report = run_scenario(&params, &data, Scenario::DoubleError, &mut rng).unwrap();
        let case = &report.cases[0];
        assert!(case.passed);
        assert!(!case.outcome.is_data_reliable());
    }

    #[test]
    fn test_scenario_rejects_bad_data() {
        let params = CodeParameters::derive(8).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(run_scenario(&params, &[1, 0], Scenario::All, &mut rng).is_err());
    }

    #[test]
    fn test_sweep_counts() {
        for k in [1, 4, 8, 16, 32] {
            let params = CodeParameters::derive(k).unwrap();
            let data: Vec<u8> = (0..k).map(|i| (i % 3 == 1) as u8).collect();
            let summary = sweep(&params, &data).unwrap();
            let n = params.n();
            assert_eq!(summary.single.total(), n);
            assert_eq!(summary.double.total(), n * (n - 1) / 2);
            assert!(summary.all_passed(), "k={} failures={:?}", k, summary.failures);
        }
    }
}
