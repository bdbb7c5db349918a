//! Combined configuration for the shell
//!
//! A single TOML file with one table per crate:
//!
//! ```toml
//! [ledger]
//! export_path = "house.tsv"
//!
//! [settlement.netting]
//! tolerance = 0.001
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shell configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ledger settings
    pub ledger: ledger_core::Config,

    /// Settlement settings
    pub settlement: settlement::Config,
}

impl AppConfig {
    /// Load from `path` if given, otherwise from environment variables
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self {
                ledger: ledger_core::Config::from_env()?,
                settlement: settlement::Config::from_env()?,
            }),
        }
    }

    /// Load from a TOML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.settlement.netting.validate()?;
        Ok(config)
    }
}
