//! Property-based tests for trade planning.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::trade::service::TradeService;
use crate::trade::types::{
    LineProduct, NewProductLine, PaymentTerms, TradeDraft, TradeKind, TradeLine,
};

fn arb_line() -> impl Strategy<Value = TradeLine> {
    (1i32..100, 1i64..100_000, 1i64..100_000).prop_map(|(quantity, cost, sale)| {
        TradeLine::New(NewProductLine {
            description: "item".to_string(),
            category: "geral".to_string(),
            quantity,
            cost_price: Decimal::new(cost, 2),
            sale_price: Decimal::new(sale, 2),
        })
    })
}

fn arb_kind() -> impl Strategy<Value = TradeKind> {
    prop_oneof![Just(TradeKind::Purchase), Just(TradeKind::Sale)]
}

proptest! {
    /// New products start with the traded quantity signed by direction,
    /// and the total is the sum of line subtotals.
    #[test]
    fn prop_plan_signs_and_totals(
        kind in arb_kind(),
        lines in prop::collection::vec(arb_line(), 1..10),
    ) {
        let draft = TradeDraft {
            kind,
            counterparty: "Alguém".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            lines: lines.clone(),
            terms: PaymentTerms::default(),
        };
        let plan = TradeService::plan(&draft).unwrap();

        let expected: Decimal = lines
            .iter()
            .map(|l| Decimal::from(l.quantity()) * TradeService::unit_price(kind, l))
            .sum();
        prop_assert_eq!(plan.total, expected);

        for (planned, line) in plan.lines.iter().zip(&lines) {
            let LineProduct::New(spec) = &planned.product else {
                return Err(TestCaseError::fail("expected new product"));
            };
            let expected_qty = match kind {
                TradeKind::Purchase => line.quantity(),
                TradeKind::Sale => -line.quantity(),
            };
            prop_assert_eq!(spec.quantity, expected_qty);
        }
    }
}
