//! Ledger engine
//!
//! Owns the recorded transactions and the identity registry, and derives
//! balances from them on demand.
//!
//! # Example
//!
//! ```
//! use ledger_core::Ledger;
//!
//! let mut ledger = Ledger::new();
//! ledger.add_transaction("Robert", "Mike", 33.28, "For pizza")?;
//!
//! let balances = ledger.calculate_balances();
//! assert_eq!(balances.as_slice(), &[33.28, -33.28]);
//! # Ok::<(), ledger_core::Error>(())
//! ```

use crate::{
    registry::IdentityRegistry,
    types::{Balances, ParticipantId, Transaction},
    Error, Result,
};
use std::fmt;

/// In-memory shared-expense ledger
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Transactions in recording order
    transactions: Vec<Transaction>,

    /// Participant names
    registry: IdentityRegistry,
}

impl Ledger {
    /// Create empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `payer` paid `recipient` the given amount
    ///
    /// Names are resolved payer first, so on simultaneous first sight the
    /// payer gets the lower id. A self-payment is rejected before any name
    /// is registered. The amount is recorded as given; callers validate it.
    pub fn add_transaction(
        &mut self,
        payer: &str,
        recipient: &str,
        amount: f64,
        comment: &str,
    ) -> Result<&Transaction> {
        let payer = payer.trim();
        let recipient = recipient.trim();

        if payer.is_empty() || recipient.is_empty() {
            return Err(Error::EmptyName);
        }
        if payer == recipient {
            tracing::warn!(participant = payer, "Rejected self-transaction");
            return Err(Error::SelfTransaction {
                name: payer.to_string(),
            });
        }

        let payer_id = self.registry.resolve(payer);
        let recipient_id = self.registry.resolve(recipient);
        let comment = Some(comment.to_string());

        self.transactions
            .push(Transaction::new(payer_id, recipient_id, amount, comment));
        tracing::debug!(payer, recipient, amount, "Recorded transaction");

        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Net balance of every participant
    ///
    /// Recomputed from the full transaction list on every call.
    pub fn calculate_balances(&self) -> Balances {
        let mut balances = Balances::zeroed(self.registry.len());
        for tx in &self.transactions {
            balances.record(tx);
        }
        balances
    }

    /// Transactions in recording order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Participant registry
    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    /// Name behind an id
    pub fn participant_name(&self, id: ParticipantId) -> Option<&str> {
        self.registry.name(id)
    }

    /// Number of distinct participants
    pub fn participant_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of recorded transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Render a transaction with participant names instead of ids
    pub fn display<'a>(&'a self, tx: &'a Transaction) -> NamedTransaction<'a> {
        NamedTransaction { ledger: self, tx }
    }
}

/// [`Transaction`] formatter that resolves ids through a [`Ledger`]
#[derive(Debug)]
pub struct NamedTransaction<'a> {
    ledger: &'a Ledger,
    tx: &'a Transaction,
}

impl fmt::Display for NamedTransaction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |id: ParticipantId| -> String {
            self.ledger
                .participant_name(id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", id))
        };

        write!(
            f,
            "Payer: {}\tRecipient: {}\tAmount: {:.2}",
            name(self.tx.payer),
            name(self.tx.recipient),
            self.tx.amount
        )?;
        if let Some(comment) = &self.tx.comment {
            write!(f, "\n\tComment: {}", comment)?;
        }
        Ok(())
    }
}
