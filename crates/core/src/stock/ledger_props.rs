//! Property-based tests for stock arithmetic.

use proptest::prelude::*;

use caixa_shared::types::ProductId;

use crate::stock::ledger::StockLedger;
use crate::stock::types::{MovementKind, MovementPlan};

fn arb_kind() -> impl Strategy<Value = MovementKind> {
    prop_oneof![Just(MovementKind::Entry), Just(MovementKind::Exit)]
}

proptest! {
    /// Applying a movement and then its reversal restores the quantity.
    #[test]
    fn prop_reversal_restores_quantity(
        start in -100_000i32..100_000,
        kind in arb_kind(),
        quantity in 1i32..10_000,
    ) {
        let plan = MovementPlan {
            product_id: ProductId::new(),
            kind,
            quantity,
            note: String::new(),
        };
        let undo = StockLedger::reverse(&plan, String::new()).unwrap();

        let after = StockLedger::next_quantity(start, plan.kind, plan.quantity);
        let restored = StockLedger::next_quantity(after, undo.kind, undo.quantity);
        prop_assert_eq!(restored, start);
    }

    /// A sequence of movements nets out to the sum of signed deltas.
    #[test]
    fn prop_quantity_is_sum_of_deltas(
        start in -1_000i32..1_000,
        moves in prop::collection::vec((arb_kind(), 1i32..500), 0..20),
    ) {
        let end = moves
            .iter()
            .fold(start, |q, (kind, n)| StockLedger::next_quantity(q, *kind, *n));
        let deltas: i32 = moves
            .iter()
            .filter_map(|(kind, n)| StockLedger::signed_delta(*kind, *n))
            .sum();
        prop_assert_eq!(end, start + deltas);
    }
}
