//! Cash position.
//!
//! Real cash is what was actually paid or received up to today. The
//! forecast walks the scheduled entries of a period day by day starting from
//! the real cash balance.

pub mod service;
pub mod types;

pub use service::CashService;
pub use types::{DayBalance, TodaySummary};
