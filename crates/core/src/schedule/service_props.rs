//! Property-based tests for schedule generation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use caixa_shared::types::UserId;

use crate::calendar::Cadence;
use crate::schedule::service::{SHARE_SCALE, ScheduleService};
use crate::schedule::types::{EntryKind, SchedulePlan, ScheduleRequest};

fn arb_value() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2090, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_cadence() -> impl Strategy<Value = Cadence> {
    prop::sample::select(Cadence::ALL.to_vec())
}

fn request(value: Decimal, date: NaiveDate, plan: SchedulePlan) -> ScheduleRequest {
    ScheduleRequest {
        user_id: UserId::new(),
        description: "parcela".to_string(),
        value,
        kind: EntryKind::Out,
        date,
        cost_center_id: None,
        cash_box_id: None,
        plan,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Installments reconstruct the original total and their due dates
    /// strictly increase.
    #[test]
    fn prop_installments_sum_to_total(
        value in arb_value(),
        count in 2u32..48,
        date in arb_date(),
        cadence in arb_cadence(),
    ) {
        let entries = ScheduleService::generate(&request(
            value,
            date,
            SchedulePlan::Installments { count, cadence },
        ))
        .unwrap();

        prop_assert_eq!(entries.len(), count as usize);

        let sum: Decimal = entries.iter().map(|e| e.value).sum();
        prop_assert_eq!(sum, value);
        for entry in &entries {
            prop_assert!(entry.value > Decimal::ZERO);
            prop_assert!(entry.value.scale() <= SHARE_SCALE);
        }

        prop_assert_eq!(entries[0].scheduled_date, date);
        for pair in entries.windows(2) {
            prop_assert!(pair[1].scheduled_date > pair[0].scheduled_date);
            prop_assert_eq!(pair[1].scheduled_date, cadence.next_date(pair[0].scheduled_date));
        }
    }

    /// Recurrences never split the value.
    #[test]
    fn prop_recurrences_repeat_value(
        value in arb_value(),
        count in 2u32..24,
        date in arb_date(),
        cadence in arb_cadence(),
    ) {
        let entries = ScheduleService::generate(&request(
            value,
            date,
            SchedulePlan::Recurring { count, cadence },
        ))
        .unwrap();

        prop_assert_eq!(entries.len(), count as usize);
        prop_assert!(entries.iter().all(|e| e.value == value));
        prop_assert!(entries.iter().all(|e| e.installment.is_none()));
    }
}
