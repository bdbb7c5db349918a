//! Core types for the ledger
//!
//! Amounts are `f64`. Balances are compared against a tolerance rather
//! than for exact equality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense participant identifier, assigned in first-seen order from 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(usize);

impl ParticipantId {
    /// Create participant ID from a raw index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index into a balance vector
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One participant paying another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Who paid
    pub payer: ParticipantId,

    /// Who received
    pub recipient: ParticipantId,

    /// Amount paid
    pub amount: f64,

    /// Free-text note; never `Some("")`
    pub comment: Option<String>,
}

impl Transaction {
    /// Create a transaction. An empty comment is stored as `None`.
    pub fn new(
        payer: ParticipantId,
        recipient: ParticipantId,
        amount: f64,
        comment: Option<String>,
    ) -> Self {
        Self {
            payer,
            recipient,
            amount,
            comment: comment.filter(|c| !c.is_empty()),
        }
    }

    /// Comment text, empty when absent
    pub fn comment_str(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Payer: {}\tRecipient: {}\tAmount: {:.2}",
            self.payer, self.recipient, self.amount
        )?;
        if let Some(comment) = &self.comment {
            write!(f, "\n\tComment: {}", comment)?;
        }
        Ok(())
    }
}

/// Net position of every participant, indexed by [`ParticipantId`]
///
/// Positive means the participant is owed money, negative means they owe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances(Vec<f64>);

impl Balances {
    /// Zeroed balances for `participants` accounts
    pub fn zeroed(participants: usize) -> Self {
        Self(vec![0.0; participants])
    }

    /// Balance of one participant
    pub fn get(&self, id: ParticipantId) -> Option<f64> {
        self.0.get(id.index()).copied()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no accounts
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw balances in id order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consume into the raw vector
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Sum of all balances; zero up to rounding for any real ledger
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// `(id, balance)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, f64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, b)| (ParticipantId::new(i), *b))
    }

    /// Record a transaction: the payer is owed `amount` more, the recipient
    /// `amount` less. Executing a settlement transfer is recorded the same
    /// way, which moves both sides toward zero. Grows the vector if an id
    /// is out of range.
    pub fn record(&mut self, tx: &Transaction) {
        self.ensure_len(tx.payer.index().max(tx.recipient.index()) + 1);
        self.0[tx.payer.index()] += tx.amount;
        self.0[tx.recipient.index()] -= tx.amount;
    }

    /// Every balance is within `tolerance` of zero
    pub fn is_settled(&self, tolerance: f64) -> bool {
        self.0.iter().all(|b| b.abs() < tolerance)
    }

    fn ensure_len(&mut self, len: usize) {
        if self.0.len() < len {
            self.0.resize(len, 0.0);
        }
    }
}

impl From<Vec<f64>> for Balances {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> ParticipantId {
        ParticipantId::new(i)
    }

    #[test]
    fn test_empty_comment_is_none() {
        let tx = Transaction::new(id(0), id(1), 1.0, Some(String::new()));
        assert_eq!(tx.comment, None);
        assert_eq!(tx.comment_str(), "");
    }

    #[test]
    fn test_display() {
        let tx = Transaction::new(id(0), id(1), 14.5, Some("For pizza".into()));
        assert_eq!(
            tx.to_string(),
            "Payer: 0\tRecipient: 1\tAmount: 14.50\n\tComment: For pizza"
        );
    }

    #[test]
    fn test_inverse_transaction_cancels() {
        let tx = Transaction::new(id(0), id(1), 12.5, None);
        let mut balances = Balances::zeroed(2);

        balances.record(&tx);
        assert_eq!(balances.as_slice(), &[12.5, -12.5]);

        balances.record(&Transaction::new(id(1), id(0), 12.5, None));
        assert!(balances.is_settled(1e-9));
    }
}
