//! Configuration management for the secded tool

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::{load_config, save_config};

/// Settings that can come from a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Data width k in bits
    pub width: i64,
    /// Seed for random error injection
    pub seed: Option<u64>,
    /// Print JSON instead of text
    pub json: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            width: 8,
            seed: None,
            json: false,
        }
    }
}

impl ToolConfig {
    /// Load configuration from a TOML or JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        load_config(path)
    }

    /// Save configuration (JSON for a `.json` extension, TOML otherwise)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_config(self, path)
    }
}
