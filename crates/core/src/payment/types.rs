//! Payment wizard domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::{InstallmentInfo, PlannedEntry};

/// Steps of the payment wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Initial: "pay the full value?"
    ConfirmFull,
    /// Asking for the amount actually paid.
    PartialAmount,
    /// Asking whether the remainder becomes a new installment.
    NewInstallmentDecision,
    /// Asking for the remainder's due date.
    NewInstallmentDate,
    /// Terminal: a decision is available.
    Processed,
    /// Terminal: closed without writes.
    Cancelled,
}

impl WizardStep {
    /// Returns true for `Processed` and `Cancelled`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Processed | Self::Cancelled)
    }

    /// Returns the step name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfirmFull => "confirm_full",
            Self::PartialAmount => "partial_amount",
            Self::NewInstallmentDecision => "new_installment_decision",
            Self::NewInstallmentDate => "new_installment_date",
            Self::Processed => "processed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User answers fed into the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardInput {
    /// Pay the whole value.
    AcceptFull,
    /// Pay only part of it.
    DeclineFull,
    /// Amount actually paid.
    EnterAmount {
        /// Amount.
        amount: Decimal,
    },
    /// Do not create an entry for the remainder.
    DeclineNewInstallment,
    /// Create an entry for the remainder.
    AcceptNewInstallment,
    /// Due date of the remainder entry.
    ChooseDate {
        /// Due date.
        date: NaiveDate,
    },
    /// Close the wizard.
    Cancel,
}

/// What the wizard decided once it reached `Processed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDecision {
    /// Amount actually paid.
    pub paid: Decimal,
    /// Due date for the remainder entry, if one was requested.
    pub remainder_due: Option<NaiveDate>,
}

/// New state of the paid entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealizedUpdate {
    /// Value becomes the amount paid.
    pub value: Decimal,
    /// Date of payment.
    pub realized_date: NaiveDate,
    /// Description, renumbered when a remainder installment is added.
    pub description: String,
    /// Installment descriptor, total incremented when a remainder is added.
    pub installment: Option<InstallmentInfo>,
}

/// Everything to write for one payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutcome {
    /// Update for the original entry (status becomes realized).
    pub realized: RealizedUpdate,
    /// New scheduled entry holding the unpaid remainder.
    pub remainder_entry: Option<PlannedEntry>,
}
