//! Real cash and daily forecast.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::cash::types::{DayBalance, TodaySummary};
use crate::schedule::{EntryKind, EntryStatus, PlannedEntry};

/// Stateless cash computations.
pub struct CashService;

impl CashService {
    /// Σ of realized entries paid on or before `today`, money in positive.
    ///
    /// A realized entry without a realized date counts from its scheduled date.
    #[must_use]
    pub fn real_cash<'a>(entries: impl IntoIterator<Item = &'a PlannedEntry>, today: NaiveDate) -> Decimal {
        entries
            .into_iter()
            .filter(|e| e.status == EntryStatus::Realized)
            .filter(|e| e.realized_date.unwrap_or(e.scheduled_date) <= today)
            .map(|e| e.kind.signed(e.value))
            .sum()
    }

    /// One row per day that has entries, in date order, accumulating from
    /// `opening`.
    #[must_use]
    pub fn daily_forecast<'a>(
        opening: Decimal,
        entries: impl IntoIterator<Item = &'a PlannedEntry>,
    ) -> Vec<DayBalance> {
        let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
        for e in entries {
            let day = days.entry(e.scheduled_date).or_default();
            match e.kind {
                EntryKind::In => day.0 += e.value,
                EntryKind::Out => day.1 += e.value,
            }
        }

        let mut balance = opening;
        days.into_iter()
            .map(|(date, (receipts, expenses))| {
                balance += receipts - expenses;
                DayBalance {
                    date,
                    receipts,
                    expenses,
                    balance,
                }
            })
            .collect()
    }

    /// Money in and out scheduled for `today`.
    #[must_use]
    pub fn today<'a>(entries: impl IntoIterator<Item = &'a PlannedEntry>, today: NaiveDate) -> TodaySummary {
        entries
            .into_iter()
            .filter(|e| e.scheduled_date == today)
            .fold(TodaySummary::default(), |mut acc, e| {
                match e.kind {
                    EntryKind::In => acc.receipts += e.value,
                    EntryKind::Out => acc.expenses += e.value,
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caixa_shared::types::UserId;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn entry(kind: EntryKind, value: Decimal, day: u32, realized: Option<u32>) -> PlannedEntry {
        PlannedEntry {
            user_id: UserId::new(),
            description: "X".to_string(),
            value,
            kind,
            scheduled_date: d(day),
            realized_date: realized.map(d),
            status: if realized.is_some() {
                EntryStatus::Realized
            } else {
                EntryStatus::Scheduled
            },
            cost_center_id: None,
            cash_box_id: None,
            origin: "financeiro".to_string(),
            installment: None,
            recurrence: None,
        }
    }

    #[test]
    fn test_real_cash() {
        let entries = vec![
            entry(EntryKind::In, dec!(500), 1, Some(2)),
            entry(EntryKind::Out, dec!(120), 3, Some(3)),
            entry(EntryKind::Out, dec!(80), 3, Some(20)),
            entry(EntryKind::In, dec!(1000), 4, None),
        ];
        assert_eq!(CashService::real_cash(&entries, d(10)), dec!(380));
    }

    #[test]
    fn test_realized_without_date_uses_schedule() {
        let mut e = entry(EntryKind::In, dec!(50), 5, None);
        e.status = EntryStatus::Realized;
        assert_eq!(CashService::real_cash([&e], d(4)), Decimal::ZERO);
        assert_eq!(CashService::real_cash([&e], d(5)), dec!(50));
    }

    #[test]
    fn test_daily_forecast() {
        let entries = vec![
            entry(EntryKind::Out, dec!(30), 12, None),
            entry(EntryKind::In, dec!(100), 10, None),
            entry(EntryKind::Out, dec!(20), 10, None),
        ];
        let days = CashService::daily_forecast(dec!(50), &entries);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, d(10));
        assert_eq!(days[0].receipts, dec!(100));
        assert_eq!(days[0].expenses, dec!(20));
        assert_eq!(days[0].balance, dec!(130));
        assert_eq!(days[1].balance, dec!(100));
    }

    #[test]
    fn test_today_summary() {
        let entries = vec![
            entry(EntryKind::In, dec!(10), 7, None),
            entry(EntryKind::Out, dec!(4), 7, Some(7)),
            entry(EntryKind::Out, dec!(9), 8, None),
        ];
        let summary = CashService::today(&entries, d(7));
        assert_eq!(summary.receipts, dec!(10));
        assert_eq!(summary.expenses, dec!(4));
    }
}
