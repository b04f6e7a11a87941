//! Payment wizard answers collected in one request.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::payment::types::{WizardInput, WizardStep};
use crate::payment::wizard::PaymentWizard;

/// Every answer the wizard may ask for, given up front.
///
/// A missing partial amount or due date closes the wizard without writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAnswers {
    /// Pay the whole value.
    #[serde(default)]
    pub accept_full: bool,
    /// Amount paid when not paying in full.
    pub paid_amount: Option<Decimal>,
    /// Whether the remainder becomes a new installment.
    pub new_installment: Option<bool>,
    /// Due date of the remainder installment.
    pub new_due_date: Option<NaiveDate>,
}

impl PaymentAnswers {
    /// The exact input sequence the wizard consumes for these answers,
    /// stopping at the first terminal step or rejected input.
    #[must_use]
    pub fn inputs(&self, value: Decimal) -> Vec<WizardInput> {
        let mut wizard = PaymentWizard::new(value);
        let mut inputs = Vec::new();

        while let Some(input) = self.answer(wizard.step()) {
            inputs.push(input);
            if wizard.apply(input).is_err() || wizard.step().is_terminal() {
                break;
            }
        }
        inputs
    }

    fn answer(&self, step: WizardStep) -> Option<WizardInput> {
        match step {
            WizardStep::ConfirmFull => Some(if self.accept_full {
                WizardInput::AcceptFull
            } else {
                WizardInput::DeclineFull
            }),
            WizardStep::PartialAmount => Some(
                self.paid_amount
                    .map_or(WizardInput::Cancel, |amount| WizardInput::EnterAmount { amount }),
            ),
            WizardStep::NewInstallmentDecision => self.new_installment.map(|accept| {
                if accept {
                    WizardInput::AcceptNewInstallment
                } else {
                    WizardInput::DeclineNewInstallment
                }
            }),
            WizardStep::NewInstallmentDate => Some(
                self.new_due_date
                    .map_or(WizardInput::Cancel, |date| WizardInput::ChooseDate { date }),
            ),
            WizardStep::Processed | WizardStep::Cancelled => None,
        }
    }
}
