//! Calendar arithmetic for schedules.
//!
//! Dates are plain calendar dates (`NaiveDate`); no timezone conversion
//! happens here.

pub mod cadence;
pub mod dates;

#[cfg(test)]
mod dates_props;

pub use cadence::{Cadence, advance_by_tag};
pub use dates::{add_days, add_months, month_window};
