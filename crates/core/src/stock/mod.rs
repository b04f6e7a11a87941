//! Stock ledger.
//!
//! On-hand quantities only change through signed movements. This module
//! computes the next quantity for a movement, its exact inverse, and the
//! notes written to the movement log.
//!
//! # Modules
//!
//! - `types` - Movement kinds and planned movements
//! - `ledger` - Quantity arithmetic and reversal
//! - `notes` - Movement log notes

pub mod ledger;
pub mod notes;
pub mod types;

#[cfg(test)]
mod ledger_props;

pub use ledger::{MovementError, StockLedger};
pub use types::{MovementKind, MovementPlan};
