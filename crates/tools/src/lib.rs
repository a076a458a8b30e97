//! SEC-DED tools library

pub mod common;
pub mod config;
pub mod report;

pub use common::{init_logging, make_rng, GlobalConfig};
pub use config::ToolConfig;
