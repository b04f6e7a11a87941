//! Property-based tests for calendar arithmetic.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use super::cadence::Cadence;
use super::dates::{add_days, add_months};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
            .or_else(|| NaiveDate::from_ymd_opt(y, m, 28))
            .unwrap()
    })
}

fn arb_cadence() -> impl Strategy<Value = Cadence> {
    prop::sample::select(Cadence::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Month addition never lands past the original day-of-month and only
    /// lands before it when the target month is shorter.
    #[test]
    fn prop_add_months_clamps(date in arb_date(), n in 0u32..36) {
        let result = add_months(date, n);
        prop_assert!(result.day() <= date.day());
        if result.day() < date.day() {
            let next = result.succ_opt().unwrap();
            prop_assert_eq!(next.day(), 1);
        }
    }

    /// Day addition agrees with chrono's duration arithmetic.
    #[test]
    fn prop_add_days_matches_duration(date in arb_date(), n in 0u64..2000) {
        let expected = date + chrono::Duration::days(i64::try_from(n).unwrap());
        prop_assert_eq!(add_days(date, n), expected);
    }

    /// Every cadence moves strictly forward.
    #[test]
    fn prop_cadence_strictly_increasing(date in arb_date(), cadence in arb_cadence()) {
        prop_assert!(cadence.next_date(date) > date);
    }
}
