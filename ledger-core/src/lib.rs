//! Split Ledger Core
//!
//! In-memory shared-expense ledger: records who paid whom, resolves
//! participant names to dense ids and derives net balances.
//!
//! # Invariants
//!
//! - Money conservation: Σ(balances) == 0 up to floating-point rounding
//! - Dense identities: ids are exactly `0..participant_count()`
//! - Insertion order: transactions are kept in the order they were recorded
//! - No self-payments: payer and recipient always differ

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod registry;
pub mod ledger;
pub mod format;
pub mod error;
pub mod config;

// Re-exports
pub use error::{Error, Result};
pub use types::{Balances, ParticipantId, Transaction};
pub use registry::IdentityRegistry;
pub use ledger::{Ledger, NamedTransaction};
pub use format::{ImportReport, ParseError, ParseErrorKind};
pub use config::Config;
