//! Ledger entry scheduling.
//!
//! Turns one user request into the ledger entries to insert: a single
//! entry, K installments that split the value, K recurrences that repeat
//! it, or one entry tagged with a monthly/yearly recurrence.
//!
//! # Modules
//!
//! - `types` - Ledger entry types and their stored tags
//! - `error` - Schedule validation errors
//! - `description` - Installment suffix helpers
//! - `service` - Schedule generation and entry edits

pub mod description;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use description::{installment_description, strip_installment_suffix};
pub use error::ScheduleError;
pub use service::ScheduleService;
pub use types::{
    EntryEdit, EntryKind, EntryStatus, InstallmentInfo, LedgerEntry, PlannedEntry,
    RecurrenceInfo, SchedulePlan, ScheduleRequest,
};
