//! Advanced payment of ledger entries.
//!
//! A small state machine (`PaymentWizard`) collects the answers needed to
//! pay a scheduled entry in full or in part. Once it reaches `Processed` it
//! yields a `PaymentDecision`, and `PaymentService::settle` turns that into
//! the update of the original entry plus an optional remainder entry.
//!
//! # Modules
//!
//! - `types` - Wizard steps, inputs and settlement outcome
//! - `answers` - All answers of one payment request
//! - `error` - Wizard errors
//! - `wizard` - The state machine
//! - `service` - Settlement of a decision against a stored entry

pub mod answers;
pub mod error;
pub mod service;
pub mod types;
pub mod wizard;

#[cfg(test)]
mod wizard_props;

pub use answers::PaymentAnswers;
pub use error::PaymentError;
pub use service::PaymentService;
pub use types::{PaymentDecision, PaymentOutcome, RealizedUpdate, WizardInput, WizardStep};
pub use wizard::PaymentWizard;
