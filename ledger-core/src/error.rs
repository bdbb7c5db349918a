//! Error types for the ledger

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
#[derive(Error, Debug)]
pub enum Error {
    /// Payer and recipient resolve to the same participant
    #[error("Invalid transaction: payer and recipient are both '{name}'")]
    SelfTransaction {
        /// The offending participant name
        name: String,
    },

    /// Participant name is empty or whitespace
    #[error("Invalid transaction: participant name must not be empty")]
    EmptyName,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
