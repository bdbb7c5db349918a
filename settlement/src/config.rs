//! Configuration for the settlement engine

use serde::{Deserialize, Serialize};

/// Balances smaller than this are treated as settled
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Settlement engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Netting configuration
    pub netting: NettingConfig,
}

/// Netting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NettingConfig {
    /// Settlement stops once the largest balance drops below this
    pub tolerance: f64,
}

impl Default for NettingConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl NettingConfig {
    /// Reject tolerances that would never or always terminate
    pub fn validate(&self) -> crate::Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(crate::Error::Config(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.netting.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(raw) = std::env::var("SETTLEMENT_TOLERANCE") {
            config.netting.tolerance = raw.parse().map_err(|_| {
                crate::Error::Config(format!("SETTLEMENT_TOLERANCE is not a number: {}", raw))
            })?;
        }

        config.netting.validate()?;
        Ok(config)
    }
}
