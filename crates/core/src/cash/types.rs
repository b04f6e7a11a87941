//! Cash computation results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Forecast for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBalance {
    /// Day.
    pub date: NaiveDate,
    /// Σ money in due that day.
    pub receipts: Decimal,
    /// Σ money out due that day.
    pub expenses: Decimal,
    /// Running balance after the day.
    pub balance: Decimal,
}

/// Money in and out due today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodaySummary {
    /// Σ money in.
    pub receipts: Decimal,
    /// Σ money out.
    pub expenses: Decimal,
}
