//! Text rendering of codec results

use secded_core::prelude::*;

const RULE: &str = "======================================================================";

fn join_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Join rendered lines, each terminated by a newline
fn finish(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Code parameters and the role of every position
pub fn render_params(params: &CodeParameters) -> String {
    let mut out = finish(vec![
        format!("Hamming {} SEC-DED code", params),
        format!("Data bits (k):                {}", params.k()),
        format!("SEC parity bits (p_sec):      {}", params.p_sec()),
        format!("Total parity bits (p_ded):    {}", params.p_ded()),
        format!("Codeword bits (n):            {}", params.n()),
        format!("Code rate:                    {:.4}", params.code_rate()),
    ]);
    out.push_str(&render_layout(params));
    out
}

/// Position lists, 1-indexed
pub fn render_layout(params: &CodeParameters) -> String {
    let roles: Vec<String> = params
        .layout()
        .into_iter()
        .map(|(pos, role)| format!("{}:{}", pos, role.label()))
        .collect();
    finish(vec![
        "Bit roles: Ps=SEC parity, D=data, Po=overall parity".to_string(),
        format!(
            "SEC parity positions:         [{}]",
            join_positions(params.sec_parity_positions())
        ),
        format!(
            "Data positions:               [{}]",
            join_positions(params.data_positions())
        ),
        format!(
            "Overall parity position:      {}",
            params.overall_parity_position()
        ),
        format!("Layout:                       {}", roles.join(" ")),
    ])
}

pub fn render_encode(params: &CodeParameters, data: &[u8], codeword: &Codeword) -> String {
    let mut lines = vec![
        format!("Encoding result for {}-bit data", params.k()),
        format!("Input data ({} bits):         {}", params.k(), format_bits(data)),
    ];
    if params.k() <= 64 {
        let value = data.iter().fold(0u64, |acc, &b| (acc << 1) | u64::from(b));
        lines.push(format!("Input decimal value:          {}", value));
    }
    lines.push(format!("Codeword ({} bits):           {}", params.n(), codeword));

    let mut out = finish(lines);
    out.push_str(&render_layout(params));
    out
}

pub fn render_decode(params: &CodeParameters, received: &Codeword, outcome: &DecodeOutcome) -> String {
    let parity = if outcome.report.overall_parity_ok { "OK" } else { "MISMATCH" };
    let reliability = if outcome.is_data_reliable() { "" } else { " (UNRELIABLE)" };
    finish(vec![
        format!("Decoding result for {} code", params),
        format!("Received codeword:            {}", received),
        format!("Syndrome:                     {}", outcome.report.syndrome),
        format!("Overall parity:               {}", parity),
        format!(
            "Status:                       {} ({})",
            outcome.classification.status_code(),
            outcome.classification.label()
        ),
        format!("Diagnosis:                    {}", outcome.diagnosis),
        format!("Corrected codeword:           {}", outcome.corrected),
        format!(
            "Decoded data:                 {}{}",
            format_bits(&outcome.data),
            reliability
        ),
    ])
}

pub fn render_inject(original: &Codeword, corrupted: &Codeword, positions: &[Position]) -> String {
    finish(vec![
        format!("Original codeword:            {}", original),
        format!("Flipped positions (1-indexed): {}", join_positions(positions)),
        format!("Corrupted codeword:           {}", corrupted),
    ])
}

pub fn render_scenario(report: &ScenarioReport, scenario: Scenario) -> String {
    let mut lines = vec![
        format!("Error test results for Hamming {} SEC-DED", report.code),
        RULE.to_string(),
        format!("Test data ({} bits):          {}", report.data.len(), format_bits(&report.data)),
        format!("Encoded codeword:             {}", report.codeword),
        String::new(),
    ];

    for (i, case) in report.cases.iter().enumerate() {
        let title = match case.kind {
            CaseKind::NoError => "No error",
            CaseKind::SingleError => "Single error (random position)",
            CaseKind::DoubleError => "Double error (random positions)",
        };
        lines.push(format!("TEST {}: {}", i + 1, title));
        lines.push("-".repeat(40));
        if !case.injected.is_empty() {
            lines.push(format!("  Injected positions: {}", join_positions(&case.injected)));
            lines.push(format!("  Corrupted codeword: {}", case.corrupted));
        }
        lines.push(format!("  Decoder: {}", case.outcome.diagnosis));
        lines.push(format!(
            "  Status: {} -> {}",
            case.outcome.classification.status_code(),
            if case.passed { "PASS" } else { "FAIL" }
        ));
        let data_match = case.outcome.data == report.data;
        let note = match (case.kind, data_match) {
            (CaseKind::DoubleError, true) => "YES (not trusted, double error)",
            (CaseKind::DoubleError, false) => "NO (expected for an uncorrectable double error)",
            (_, true) => "YES",
            (_, false) => "NO",
        };
        lines.push(format!("  Data match: {}", note));
        lines.push(String::new());
    }

    lines.push(RULE.to_string());
    if scenario == Scenario::All {
        let verdict = if report.all_passed() { "ALL SCENARIOS PASSED" } else { "ONE OR MORE SCENARIOS FAILED" };
        lines.push(format!("Overall: {}", verdict));
    } else {
        let verdict = if report.all_passed() { "PASS" } else { "FAIL" };
        lines.push(format!("Scenario complete: {}", verdict));
    }
    finish(lines)
}

pub fn render_sweep(params: &CodeParameters, summary: &SweepSummary) -> String {
    let mut lines = vec![
        format!("Exhaustive sweep of Hamming {} SEC-DED", params),
        format!(
            "Single errors corrected:      {}/{}",
            summary.single.passed,
            summary.single.total()
        ),
        format!(
            "Double errors detected:       {}/{}",
            summary.double.passed,
            summary.double.total()
        ),
    ];
    lines.extend(
        summary
            .failures
            .iter()
            .map(|failure| format!("  FAILED at positions {}", join_positions(failure))),
    );
    finish(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_render_params() {
        let params = CodeParameters::derive(8).unwrap();
        let text = render_params(&params);
        assert!(text.contains("Hamming (13,8) SEC-DED code"));
        assert!(text.contains("[1, 2, 4, 8]"));
        assert!(text.contains("[3, 5, 6, 7, 9, 10, 11, 12]"));
        assert!(text.contains("13:Po"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_render_encode() {
        let params = CodeParameters::derive(8).unwrap();
        let data = parse_bits("11010010").unwrap();
        let cw = encode(&params, &data).unwrap();
        let text = render_encode(&params, &data, &cw);
        assert!(text.contains("0110101100100"));
        assert!(text.contains("210"));
    }

    #[test]
    fn test_render_decode_marks_unreliable() {
        let params = CodeParameters::derive(8).unwrap();
        let received: Codeword = "0100101110100".parse().unwrap();
        let outcome = decode(&params, &received).unwrap();
        let text = render_decode(&params, &received, &outcome);
        assert!(text.contains("double error detected"));
        assert!(text.contains("UNRELIABLE"));
    }

    #[test]
    fn test_render_scenario() {
        let params = CodeParameters::derive(8).unwrap();
        let data = parse_bits("11010010").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let report = run_scenario(&params, &data, Scenario::All, &mut rng).unwrap();
        let text = render_scenario(&report, Scenario::All);
        assert!(text.contains("TEST 3: Double error"));
        assert!(text.contains("ALL SCENARIOS PASSED"));
    }

    #[test]
    fn test_render_inject_and_sweep() {
        let params = CodeParameters::derive(8).unwrap();
        let original: Codeword = "0110101100100".parse().unwrap();
        let corrupted: Codeword = "0100101110100".parse().unwrap();
        let positions = original.diff_positions(&corrupted);
        let text = render_inject(&original, &corrupted, &positions);
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Flipped positions (1-indexed): 3, 9"));

        let data = parse_bits("11010010").unwrap();
        let summary = sweep(&params, &data).unwrap();
        let text = render_sweep(&params, &summary);
        assert!(text.contains("Single errors corrected:      13/13"));
        assert!(text.contains("Double errors detected:       78/78"));
        assert!(!text.contains("FAILED"));
    }
}
