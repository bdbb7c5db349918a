//! # split-ledger shell
//!
//! Interactive front end over [`ledger_core`] and [`settlement`]: prompts
//! for transactions, prints balances and settlements, and imports/exports
//! ledger files.

pub mod config;
pub mod shell;

pub use config::AppConfig;
pub use shell::{Command, Shell};
