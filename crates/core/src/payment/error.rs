//! Payment wizard error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::payment::types::{WizardInput, WizardStep};

/// Errors that can occur while driving the payment wizard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// The input does not apply to the current step.
    #[error("Input {input:?} is not valid in step {step}")]
    InvalidInput {
        /// The current step.
        step: WizardStep,
        /// The rejected input.
        input: WizardInput,
    },

    /// Paid amount is zero, negative or above the entry value.
    #[error("Valor pago inválido: {paid} (valor do lançamento {value})")]
    InvalidAmount {
        /// Amount entered.
        paid: Decimal,
        /// Entry value.
        value: Decimal,
    },

    /// The answers ran out before the wizard finished.
    #[error("Payment wizard stopped at step {0}")]
    Incomplete(WizardStep),

    /// The entry was already realized.
    #[error("Lançamento já realizado")]
    AlreadyRealized,
}

impl PaymentError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. } | Self::Incomplete(_) => 400,
            Self::InvalidInput { .. } | Self::AlreadyRealized => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_WIZARD_INPUT",
            Self::InvalidAmount { .. } => "INVALID_PAID_AMOUNT",
            Self::Incomplete(_) => "WIZARD_INCOMPLETE",
            Self::AlreadyRealized => "ALREADY_REALIZED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_codes() {
        let err = PaymentError::InvalidAmount {
            paid: dec!(120),
            value: dec!(100),
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_PAID_AMOUNT");
        assert!(err.to_string().starts_with("Valor pago inválido"));

        let err = PaymentError::InvalidInput {
            step: WizardStep::Processed,
            input: WizardInput::Cancel,
        };
        assert_eq!(err.status_code(), 422);
        assert!(err.to_string().contains("processed"));
    }
}
