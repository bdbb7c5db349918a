//! Configuration for the ledger

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default file the ledger is exported to
pub const DEFAULT_EXPORT_PATH: &str = "ledger.tsv";

/// Ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Where `export_file` writes when no explicit path is given
    pub export_path: PathBuf,

    /// Default tracing directive (overridden by `RUST_LOG`)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "split-ledger".to_string(),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(path) = std::env::var("LEDGER_EXPORT_PATH") {
            if path.trim().is_empty() {
                return Err(crate::Error::Config(
                    "LEDGER_EXPORT_PATH must not be empty".to_string(),
                ));
            }
            config.export_path = PathBuf::from(path);
        }

        if let Ok(level) = std::env::var("LEDGER_LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_name, "split-ledger");
        assert_eq!(config.export_path, PathBuf::from("ledger.tsv"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(r#"export_path = "house.tsv""#).unwrap();
        assert_eq!(config.export_path, PathBuf::from("house.tsv"));
        assert_eq!(config.service_name, "split-ledger");
    }

    #[test]
    fn test_serialized_keys() {
        let text = toml::to_string(&Config::default()).unwrap();
        let table: toml::Table = toml::from_str(&text).unwrap();
        let mut keys: Vec<&str> = table.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["export_path", "log_level", "service_name"]);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.toml");
        std::fs::write(&path, "export_path = [").unwrap();

        assert!(matches!(Config::from_file(&path), Err(crate::Error::Config(_))));
    }
}
