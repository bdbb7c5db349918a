//! Greedy multilateral netting
//!
//! Replaces a ledger's transactions with at most `N - 1` transfers that
//! bring every balance to (approximately) zero.
//!
//! # Algorithm
//!
//! 1. Compute net balances for every participant
//! 2. Pick the largest creditor and the largest debtor (first in id order
//!    on ties)
//! 3. The debtor pays the creditor the smaller of the two magnitudes, which
//!    zeroes at least one of them
//! 4. Repeat until the largest balance is below the tolerance or `N - 1`
//!    transfers have been made
//!
//! # Example
//!
//! ```text
//! Balances:
//!   A: +10
//!   B:  -4
//!   C:  -6
//!
//! Transfers:
//!   C pays A: 6   (A: +4, C: 0)
//!   B pays A: 4   (A:  0, B: 0)
//! ```

use crate::{
    config::{NettingConfig, DEFAULT_TOLERANCE},
    types::{SettlementPlan, SettlementStatus},
    Result,
};
use ledger_core::{Balances, Ledger, ParticipantId, Transaction};

/// Netting engine
#[derive(Debug, Clone)]
pub struct NettingEngine {
    /// Balances below this magnitude count as settled
    tolerance: f64,
}

impl Default for NettingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl NettingEngine {
    /// Create new netting engine
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Create from validated configuration
    pub fn from_config(config: &NettingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.tolerance))
    }

    /// Settlement tolerance
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Compute the transfers that settle `ledger`
    pub fn settle(&self, ledger: &Ledger) -> SettlementPlan {
        if ledger.participant_count() == 0 {
            tracing::info!("Nothing to settle: ledger has no participants");
            return SettlementPlan::empty();
        }

        self.settle_balances(ledger.calculate_balances())
    }

    /// Compute the transfers that settle a balance vector
    ///
    /// `balances` must sum to zero; ids in the returned transfers index it.
    pub fn settle_balances(&self, balances: Balances) -> SettlementPlan {
        let participant_count = balances.len();
        if participant_count == 0 {
            return SettlementPlan::empty();
        }

        let mut balances = balances.into_vec();
        let max_transfers = participant_count - 1;
        let mut transfers = Vec::with_capacity(max_transfers);

        for _ in 0..max_transfers {
            let creditor = max_index(&balances);
            let debtor = min_index(&balances);
            let credit = balances[creditor];
            let debt = -balances[debtor];

            if credit < self.tolerance {
                tracing::debug!(
                    transfers = transfers.len(),
                    bound = max_transfers,
                    "Balances within tolerance, stopping early"
                );
                break;
            }
            // Only reachable when the input does not sum to zero.
            if creditor == debtor || debt <= 0.0 {
                tracing::warn!(credit, debt, "No debtor left for remaining credit");
                break;
            }

            let amount = if credit > debt {
                balances[creditor] -= debt;
                balances[debtor] = 0.0;
                debt
            } else {
                balances[debtor] += credit;
                balances[creditor] = 0.0;
                credit
            };

            tracing::debug!(debtor, creditor, amount, "Settlement transfer");
            transfers.push(Transaction::new(
                ParticipantId::new(debtor),
                ParticipantId::new(creditor),
                amount,
                None,
            ));
        }

        let status = if transfers.is_empty() {
            SettlementStatus::AlreadySettled
        } else {
            SettlementStatus::Settled
        };

        tracing::info!(
            participants = participant_count,
            transfers = transfers.len(),
            "Settlement computed"
        );

        SettlementPlan {
            transfers,
            participant_count,
            residual: Balances::from(balances),
            status,
        }
    }
}

/// Index of the first maximum
fn max_index(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Index of the first minimum
fn min_index(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v < values[best] {
            best = i;
        }
    }
    best
}
