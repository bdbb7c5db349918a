//! Core types for the settlement engine

use ledger_core::{Balances, Transaction};
use serde::{Deserialize, Serialize};

/// How a settlement run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementStatus {
    /// Ledger has no participants
    NothingToSettle,
    /// Participants exist but every balance is already within tolerance
    AlreadySettled,
    /// At least one transfer was generated
    Settled,
}

/// Result of a settlement run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Transfers to execute, debtor → creditor, in generation order
    pub transfers: Vec<Transaction>,

    /// Participants in the ledger
    pub participant_count: usize,

    /// Balances left once every transfer is executed
    pub residual: Balances,

    /// Outcome
    pub status: SettlementStatus,
}

impl SettlementPlan {
    /// Plan for a ledger without participants
    pub fn empty() -> Self {
        Self {
            transfers: Vec::new(),
            participant_count: 0,
            residual: Balances::default(),
            status: SettlementStatus::NothingToSettle,
        }
    }

    /// Upper bound on transfers for this many participants (N - 1)
    pub fn max_transfers(&self) -> usize {
        self.participant_count.saturating_sub(1)
    }

    /// Sum of all transfer amounts
    pub fn total_settled(&self) -> f64 {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// True when no transfer is needed
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Number of transfers
    pub fn len(&self) -> usize {
        self.transfers.len()
    }
}
