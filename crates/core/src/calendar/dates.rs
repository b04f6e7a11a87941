//! Day and month offsets on calendar dates.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Adds `n` days, crossing month and year boundaries.
///
/// Saturates at `NaiveDate::MAX` instead of overflowing.
#[must_use]
pub fn add_days(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}

/// Adds `n` months, clamping to the last valid day of the target month.
///
/// `2024-01-31 + 1 month == 2024-02-29`. Saturates at `NaiveDate::MAX`.
#[must_use]
pub fn add_months(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_add_months(Months::new(n))
        .unwrap_or(NaiveDate::MAX)
}

/// Returns the first and last day of the month containing `date`.
#[must_use]
pub fn month_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = add_months(first, 1).pred_opt().unwrap_or(first);
    (first, last)
}
