//! Settlement Engine
//!
//! Turns a ledger's net balances into a short list of transfers that
//! squares everyone up.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
//!
//! # Netting Algorithm
//!
//! Greedy largest-creditor / largest-debtor matching:
//! - Every transfer fully discharges at least one participant
//! - At most `N - 1` transfers for `N` participants
//! - Balances below the configured tolerance count as settled
//!
//! # Example
//!
//! ```
//! use ledger_core::Ledger;
//! use settlement::NettingEngine;
//!
//! let mut ledger = Ledger::new();
//! ledger.add_transaction("Robert", "Mike", 33.28, "For pizza")?;
//!
//! let plan = NettingEngine::default().settle(&ledger);
//! for transfer in &plan.transfers {
//!     println!("{}", ledger.display(transfer));
//! }
//! assert_eq!(plan.transfers.len(), 1);
//! # Ok::<(), ledger_core::Error>(())
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod netting;
pub mod error;
pub mod config;

// Re-exports
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use netting::NettingEngine;
