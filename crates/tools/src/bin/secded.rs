//! secded - encode, decode and error-test extended Hamming SEC-DED codewords

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::{debug, info};

use secded_core::prelude::*;
use secded_tools::report;
use secded_tools::{init_logging, make_rng, GlobalConfig, ToolConfig};

/// Extended Hamming SEC-DED codec tool
#[derive(Parser)]
#[command(name = "secded")]
#[command(about = "Extended Hamming SEC-DED encoding, decoding and error testing")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show code parameters and bit layout
    Info,
    /// Encode a k-bit data string
    Encode {
        /// Data bits, first bit first (e.g. 11010010)
        data: String,
    },
    /// Decode an n-bit codeword string
    Decode {
        /// Received codeword bits
        codeword: String,
    },
    /// Flip one or two bits of a codeword
    Inject {
        /// Codeword bits
        codeword: String,

        /// 1-indexed position to flip (repeat for a double error)
        #[arg(short, long = "pos")]
        positions: Vec<usize>,

        /// Inject a double error
        #[arg(long)]
        double: bool,
    },
    /// Run error-test scenarios against encoded data
    Test {
        /// Data bits to encode and test
        data: String,

        /// Which scenario to run
        #[arg(short, long, value_enum, default_value = "all")]
        scenario: ScenarioArg,
    },
    /// Flip every single position and every pair of positions
    Sweep {
        /// Data bits to encode and test
        data: String,
    },
}

/// Error-test scenarios
#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScenarioArg {
    NoError,
    Single,
    Double,
    All,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::NoError => Scenario::NoError,
            ScenarioArg::Single => Scenario::SingleError,
            ScenarioArg::Double => Scenario::DoubleError,
            ScenarioArg::All => Scenario::All,
        }
    }
}

fn parse_data(text: &str) -> Result<Vec<u8>> {
    parse_bits(text).context("Invalid data string")
}

fn parse_codeword(text: &str) -> Result<Codeword> {
    text.parse().context("Invalid codeword string")
}

fn data_hint(params: &CodeParameters) -> String {
    format!("Please enter exactly {} data bits (0 and 1)", params.k())
}

fn codeword_hint(params: &CodeParameters) -> String {
    format!("Please enter exactly {} codeword bits (0 and 1)", params.n())
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Commands, config: &ToolConfig) -> Result<()> {
    let params = CodeParameters::try_from(config.width)
        .with_context(|| format!("Cannot build a code for width {}", config.width))?;
    debug!("Using {} code", params);

    match command {
        Commands::Info => {
            if config.json {
                print_json(&params)?;
            } else {
                print!("{}", report::render_params(&params));
            }
        }

        Commands::Encode { data } => {
            let data = parse_data(&data)?;
            let codeword = encode(&params, &data).with_context(|| data_hint(&params))?;
            if config.json {
                print_json(&json!({
                    "code": params.to_string(),
                    "data": format_bits(&data),
                    "codeword": codeword,
                }))?;
            } else {
                print!("{}", report::render_encode(&params, &data, &codeword));
            }
        }

        Commands::Decode { codeword } => {
            let received = parse_codeword(&codeword)?;
            let outcome = decode(&params, &received).with_context(|| codeword_hint(&params))?;
            if config.json {
                print_json(&json!({
                    "code": params.to_string(),
                    "received": received,
                    "status_code": outcome.classification.status_code(),
                    "data_reliable": outcome.is_data_reliable(),
                    "outcome": outcome,
                }))?;
            } else {
                print!("{}", report::render_decode(&params, &received, &outcome));
            }
        }

        Commands::Inject {
            codeword,
            positions,
            double,
        } => {
            let original = parse_codeword(&codeword)?;
            let mut rng = make_rng(config.seed);

            let injected = match (double || positions.len() == 2, positions.as_slice()) {
                (false, []) => {
                    inject_single(&params, &original, None, &mut rng).map(|(cw, p)| (cw, vec![p]))
                }
                (false, [p]) => {
                    inject_single(&params, &original, Some(*p), &mut rng).map(|(cw, p)| (cw, vec![p]))
                }
                (true, []) => inject_double(&params, &original, None, None, &mut rng)
                    .map(|(cw, (a, b))| (cw, vec![a, b])),
                (true, [p]) => inject_double(&params, &original, Some(*p), None, &mut rng)
                    .map(|(cw, (a, b))| (cw, vec![a, b])),
                (true, [p1, p2]) => inject_double(&params, &original, Some(*p1), Some(*p2), &mut rng)
                    .map(|(cw, (a, b))| (cw, vec![a, b])),
                _ => anyhow::bail!("At most two positions can be flipped, got {}", positions.len()),
            };
            let (corrupted, flipped) =
                injected.with_context(|| format!("Cannot flip bits of a {} codeword", params))?;

            info!("Flipped positions {:?}", flipped);
            if config.json {
                print_json(&json!({
                    "original": original,
                    "positions": flipped,
                    "corrupted": corrupted,
                }))?;
            } else {
                print!("{}", report::render_inject(&original, &corrupted, &flipped));
            }
        }

        Commands::Test { data, scenario } => {
            let data = parse_data(&data)?;
            let scenario = Scenario::from(scenario);
            let mut rng = make_rng(config.seed);
            let result =
                run_scenario(&params, &data, scenario, &mut rng).with_context(|| data_hint(&params))?;

            if config.json {
                print_json(&result)?;
            } else {
                print!("{}", report::render_scenario(&result, scenario));
            }
            if !result.all_passed() {
                anyhow::bail!("One or more error-test cases failed");
            }
        }

        Commands::Sweep { data } => {
            let data = parse_data(&data)?;
            let summary = sweep(&params, &data).with_context(|| data_hint(&params))?;

            if config.json {
                print_json(&summary)?;
            } else {
                print!("{}", report::render_sweep(&params, &summary));
            }
            if !summary.all_passed() {
                anyhow::bail!("{} sweep case(s) failed", summary.failures.len());
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.global);
    let config = cli.global.resolve()?;
    info!("secded starting with width {}", config.width);

    run(cli.command, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ToolConfig {
        ToolConfig {
            seed: Some(1),
            ..ToolConfig::default()
        }
    }

    fn core_error(err: &anyhow::Error) -> Option<&SecdedError> {
        err.downcast_ref::<SecdedError>()
    }

    #[test]
    fn test_short_data_reports_wrong_length() {
        let err = run(Commands::Encode { data: "101".into() }, &config()).unwrap_err();
        assert_eq!(
            core_error(&err),
            Some(&SecdedError::WrongLength {
                kind: BitsKind::Data,
                expected: 8,
                actual: 3,
            })
        );
        assert!(format!("{:#}", err).contains("exactly 8 data bits"));
    }

    #[test]
    fn test_long_codeword_reports_wrong_length() {
        let command = Commands::Decode {
            codeword: "01101011001001".into(),
        };
        let err = run(command, &config()).unwrap_err();
        assert_eq!(
            core_error(&err),
            Some(&SecdedError::WrongLength {
                kind: BitsKind::Codeword,
                expected: 13,
                actual: 14,
            })
        );
    }

    #[test]
    fn test_inject_and_sweep_report_wrong_length() {
        let command = Commands::Inject {
            codeword: "0110".into(),
            positions: vec![1],
            double: false,
        };
        let err = run(command, &config()).unwrap_err();
        assert!(matches!(
            core_error(&err),
            Some(SecdedError::WrongLength { kind: BitsKind::Codeword, .. })
        ));

        let command = Commands::Inject {
            codeword: "0110101100100".into(),
            positions: vec![14],
            double: false,
        };
        let err = run(command, &config()).unwrap_err();
        assert_eq!(
            core_error(&err),
            Some(&SecdedError::PositionOutOfRange { position: 14, n: 13 })
        );

        let err = run(Commands::Sweep { data: "1".into() }, &config()).unwrap_err();
        assert!(matches!(
            core_error(&err),
            Some(SecdedError::WrongLength { kind: BitsKind::Data, .. })
        ));
    }

    #[test]
    fn test_invalid_symbol_is_not_a_length_error() {
        let err = run(Commands::Encode { data: "1101001x".into() }, &config()).unwrap_err();
        assert_eq!(
            core_error(&err),
            Some(&SecdedError::InvalidSymbol { symbol: 'x', index: 7 })
        );
    }

    #[test]
    fn test_valid_commands_succeed() {
        assert!(run(Commands::Encode { data: "11010010".into() }, &config()).is_ok());
        let command = Commands::Decode {
            codeword: "0110101100100".into(),
        };
        assert!(run(command, &config()).is_ok());
    }
}
