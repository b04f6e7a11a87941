//! Payment wizard state machine.

use rust_decimal::Decimal;

use crate::payment::error::PaymentError;
use crate::payment::types::{PaymentDecision, WizardInput, WizardStep};

/// Remainders at or below this amount count as paid in full.
pub const NEGLIGIBLE_REMAINDER: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// In-memory dialog state for paying one entry.
///
/// ```text
/// confirm_full ──accept──────────────────────────────► processed
///      │decline
///      ▼
/// partial_amount ──amount, remainder ≤ 0.01──────────► processed
///      │amount, remainder > 0.01        │cancel
///      ▼                                ▼
/// new_installment_decision ──decline──► processed    cancelled
///      │accept                          ▲
///      ▼                                │cancel
/// new_installment_date ──date──► processed
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentWizard {
    value: Decimal,
    step: WizardStep,
    paid: Option<Decimal>,
    remainder_due: Option<chrono::NaiveDate>,
}

impl PaymentWizard {
    /// Opens the wizard for an entry of the given value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            step: WizardStep::ConfirmFull,
            paid: None,
            remainder_due: None,
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// The decision, available once the wizard reached `Processed`.
    #[must_use]
    pub fn decision(&self) -> Option<PaymentDecision> {
        (self.step == WizardStep::Processed).then(|| PaymentDecision {
            paid: self.paid.unwrap_or(self.value),
            remainder_due: self.remainder_due,
        })
    }

    /// Feeds one answer and returns the resulting step.
    ///
    /// A rejected answer leaves the wizard where it was.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when the answer does not belong to the current step
    /// - `InvalidAmount` when a partial amount is not in `(0, value]`
    pub fn apply(&mut self, input: WizardInput) -> Result<WizardStep, PaymentError> {
        let next = match (self.step, input) {
            (WizardStep::ConfirmFull, WizardInput::AcceptFull)
            | (WizardStep::NewInstallmentDecision, WizardInput::DeclineNewInstallment) => {
                WizardStep::Processed
            }
            (WizardStep::ConfirmFull, WizardInput::DeclineFull) => WizardStep::PartialAmount,
            (WizardStep::PartialAmount, WizardInput::EnterAmount { amount }) => {
                if amount <= Decimal::ZERO || amount > self.value {
                    return Err(PaymentError::InvalidAmount {
                        paid: amount,
                        value: self.value,
                    });
                }
                self.paid = Some(amount);
                if self.value - amount > NEGLIGIBLE_REMAINDER {
                    WizardStep::NewInstallmentDecision
                } else {
                    WizardStep::Processed
                }
            }
            (WizardStep::NewInstallmentDecision, WizardInput::AcceptNewInstallment) => {
                WizardStep::NewInstallmentDate
            }
            (WizardStep::NewInstallmentDate, WizardInput::ChooseDate { date }) => {
                self.remainder_due = Some(date);
                WizardStep::Processed
            }
            (WizardStep::PartialAmount | WizardStep::NewInstallmentDate, WizardInput::Cancel) => {
                self.paid = None;
                self.remainder_due = None;
                WizardStep::Cancelled
            }
            (step, input) => return Err(PaymentError::InvalidInput { step, input }),
        };

        self.step = next;
        Ok(next)
    }

    /// Replays a full answer sequence.
    ///
    /// Returns `Ok(None)` when the sequence cancels the wizard.
    ///
    /// # Errors
    ///
    /// Propagates the first rejected answer, and returns `Incomplete` when
    /// the answers end before a terminal step or `InvalidInput` when answers
    /// remain after one.
    pub fn run(
        value: Decimal,
        inputs: impl IntoIterator<Item = WizardInput>,
    ) -> Result<Option<PaymentDecision>, PaymentError> {
        let mut wizard = Self::new(value);
        for input in inputs {
            wizard.apply(input)?;
        }
        match wizard.step {
            WizardStep::Processed => Ok(wizard.decision()),
            WizardStep::Cancelled => Ok(None),
            step => Err(PaymentError::Incomplete(step)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 10).unwrap()
    }

    #[test]
    fn test_full_payment() {
        let decision = PaymentWizard::run(dec!(100), [WizardInput::AcceptFull])
            .unwrap()
            .unwrap();
        assert_eq!(decision.paid, dec!(100));
        assert!(decision.remainder_due.is_none());
    }

    #[test]
    fn test_partial_with_new_installment() {
        let decision = PaymentWizard::run(
            dec!(100),
            [
                WizardInput::DeclineFull,
                WizardInput::EnterAmount { amount: dec!(60) },
                WizardInput::AcceptNewInstallment,
                WizardInput::ChooseDate { date: due() },
            ],
        )
        .unwrap()
        .unwrap();
        assert_eq!(decision.paid, dec!(60));
        assert_eq!(decision.remainder_due, Some(due()));
    }

    #[test]
    fn test_partial_declining_new_installment() {
        let decision = PaymentWizard::run(
            dec!(100),
            [
                WizardInput::DeclineFull,
                WizardInput::EnterAmount { amount: dec!(60) },
                WizardInput::DeclineNewInstallment,
            ],
        )
        .unwrap()
        .unwrap();
        assert_eq!(decision.paid, dec!(60));
        assert!(decision.remainder_due.is_none());
    }

    #[test]
    fn test_negligible_remainder_is_full_payment() {
        let mut wizard = PaymentWizard::new(dec!(100));
        wizard.apply(WizardInput::DeclineFull).unwrap();
        let step = wizard
            .apply(WizardInput::EnterAmount { amount: dec!(99.99) })
            .unwrap();
        assert_eq!(step, WizardStep::Processed);
        assert_eq!(wizard.decision().unwrap().paid, dec!(99.99));
    }

    #[test]
    fn test_invalid_amount_keeps_step() {
        let mut wizard = PaymentWizard::new(dec!(100));
        wizard.apply(WizardInput::DeclineFull).unwrap();

        for amount in [dec!(0), dec!(-5), dec!(100.01)] {
            let err = wizard.apply(WizardInput::EnterAmount { amount }).unwrap_err();
            assert!(matches!(err, PaymentError::InvalidAmount { .. }));
            assert_eq!(wizard.step(), WizardStep::PartialAmount);
        }
    }

    #[test]
    fn test_cancel_from_partial_and_date() {
        assert_eq!(
            PaymentWizard::run(dec!(50), [WizardInput::DeclineFull, WizardInput::Cancel]).unwrap(),
            None
        );
        assert_eq!(
            PaymentWizard::run(
                dec!(50),
                [
                    WizardInput::DeclineFull,
                    WizardInput::EnterAmount { amount: dec!(10) },
                    WizardInput::AcceptNewInstallment,
                    WizardInput::Cancel,
                ]
            )
            .unwrap(),
            None
        );
    }

    #[test]
    fn test_cancel_not_allowed_at_decision() {
        let mut wizard = PaymentWizard::new(dec!(50));
        wizard.apply(WizardInput::DeclineFull).unwrap();
        wizard
            .apply(WizardInput::EnterAmount { amount: dec!(10) })
            .unwrap();
        assert_eq!(
            wizard.apply(WizardInput::Cancel),
            Err(PaymentError::InvalidInput {
                step: WizardStep::NewInstallmentDecision,
                input: WizardInput::Cancel,
            })
        );
    }

    #[test]
    fn test_incomplete_and_trailing_inputs() {
        assert_eq!(
            PaymentWizard::run(dec!(50), [WizardInput::DeclineFull]),
            Err(PaymentError::Incomplete(WizardStep::PartialAmount))
        );
        assert!(matches!(
            PaymentWizard::run(dec!(50), [WizardInput::AcceptFull, WizardInput::AcceptFull]),
            Err(PaymentError::InvalidInput {
                step: WizardStep::Processed,
                ..
            })
        ));
    }
}
