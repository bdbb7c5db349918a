//! Property-based tests for settlement invariants
//!
//! - Correctness: executing the plan leaves every balance within tolerance
//! - Bound: never more than N - 1 transfers
//! - Idempotence: settling a settled ledger produces nothing

use ledger_core::Ledger;
use proptest::prelude::*;
use settlement::{NettingEngine, SettlementStatus};

const TOLERANCE: f64 = 1e-3;

/// Strategy for generating (payer, recipient, amount) rows among a small group
fn row_strategy() -> impl Strategy<Value = (usize, usize, f64)> {
    (0usize..8, 0usize..8, 1u64..100_000u64)
        .prop_filter("payer and recipient must differ", |(p, r, _)| p != r)
        .prop_map(|(p, r, cents)| (p, r, cents as f64 / 100.0))
}

fn build_ledger(rows: &[(usize, usize, f64)]) -> Ledger {
    let mut ledger = Ledger::new();
    for (payer, recipient, amount) in rows {
        ledger
            .add_transaction(
                &format!("P{}", payer),
                &format!("P{}", recipient),
                *amount,
                "",
            )
            .unwrap();
    }
    ledger
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: executing every transfer zeroes all balances
    #[test]
    fn prop_settlement_zeroes_balances(rows in prop::collection::vec(row_strategy(), 1..50)) {
        let ledger = build_ledger(&rows);
        let plan = NettingEngine::new(TOLERANCE).settle(&ledger);

        let mut balances = ledger.calculate_balances();
        for transfer in &plan.transfers {
            prop_assert!(transfer.amount > 0.0);
            prop_assert_ne!(transfer.payer, transfer.recipient);
            balances.record(transfer);
        }

        prop_assert!(balances.is_settled(TOLERANCE), "left over: {:?}", balances);
        prop_assert!(plan.residual.is_settled(TOLERANCE));
    }

    /// Property: at most N - 1 transfers
    #[test]
    fn prop_transfer_bound(rows in prop::collection::vec(row_strategy(), 0..50)) {
        let ledger = build_ledger(&rows);
        let plan = NettingEngine::new(TOLERANCE).settle(&ledger);

        prop_assert!(plan.len() <= ledger.participant_count().saturating_sub(1));
        prop_assert_eq!(plan.max_transfers(), ledger.participant_count().saturating_sub(1));
    }

    /// Property: a ledger extended with its own settlement needs no further transfers
    #[test]
    fn prop_settle_is_idempotent(rows in prop::collection::vec(row_strategy(), 1..50)) {
        let mut ledger = build_ledger(&rows);
        let plan = NettingEngine::new(TOLERANCE).settle(&ledger);

        let named: Vec<(String, String, f64)> = plan
            .transfers
            .iter()
            .map(|t| {
                (
                    ledger.participant_name(t.payer).unwrap().to_string(),
                    ledger.participant_name(t.recipient).unwrap().to_string(),
                    t.amount,
                )
            })
            .collect();
        for (payer, recipient, amount) in &named {
            ledger.add_transaction(payer, recipient, *amount, "").unwrap();
        }

        let again = NettingEngine::new(TOLERANCE).settle(&ledger);
        prop_assert!(again.is_empty());
        prop_assert_eq!(again.status, SettlementStatus::AlreadySettled);
    }

    /// Property: every transfer goes from a net debtor to a net creditor
    #[test]
    fn prop_transfers_follow_balance_sign(rows in prop::collection::vec(row_strategy(), 1..50)) {
        let ledger = build_ledger(&rows);
        let balances = ledger.calculate_balances();
        let plan = NettingEngine::new(TOLERANCE).settle(&ledger);

        for transfer in &plan.transfers {
            prop_assert!(balances.get(transfer.payer).unwrap() < 0.0);
            prop_assert!(balances.get(transfer.recipient).unwrap() > 0.0);
        }
    }
}
