//! Cost center classification.
//!
//! A cost center is a named bucket that classifies ledger entries as revenue
//! or expense within the house or store context.

pub mod types;

pub use types::{CostCenterContext, CostCenterDraft, CostCenterKind, CostCenterRecurrence};
