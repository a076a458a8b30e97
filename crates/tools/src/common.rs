//! Common utilities and configuration for tools

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ToolConfig;

/// Global configuration options
#[derive(Debug, Clone, Args)]
pub struct GlobalConfig {
    /// Configuration file path (TOML or JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data width k in bits
    #[arg(short = 'k', long, global = true)]
    pub width: Option<i64>,

    /// Seed for random error positions
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            config: None,
            width: None,
            seed: None,
            json: false,
            verbose: false,
            debug: false,
        }
    }
}

impl GlobalConfig {
    /// Merge file configuration (if any) with command-line overrides
    pub fn resolve(&self) -> Result<ToolConfig> {
        let mut config = match &self.config {
            Some(path) => ToolConfig::from_file(path)?,
            None => ToolConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.json |= self.json;

        Ok(config)
    }
}

/// Random source for error injection: seeded when a seed is configured
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Initialize logging based on configuration
pub fn init_logging(config: &GlobalConfig) {
    let log_level = if config.debug {
        tracing::Level::DEBUG
    } else if config.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration from file
pub fn load_config<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    // Try JSON first, then TOML
    if let Ok(config) = serde_json::from_str(&content) {
        return Ok(config);
    }

    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("Failed to parse config file {:?}: {}", path, e),
    }
}

/// Save configuration to file
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let content = if path.extension().and_then(|s| s.to_str()) == Some("json") {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    Ok(())
}
