//! Schedule validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised before any ledger entry is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// Description is blank.
    #[error("Descrição obrigatória")]
    EmptyDescription,

    /// Value is zero or negative.
    #[error("Valor deve ser maior que 0 (recebido {0})")]
    NonPositiveValue(Decimal),

    /// Installment or recurrence count is zero.
    #[error("Quantidade de parcelas deve ser pelo menos 1")]
    ZeroCount,

    /// Day of month outside 1..=31.
    #[error("Dia de recorrência inválido: {0}")]
    InvalidDay(u32),
}

impl ScheduleError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::NonPositiveValue(_) => "NON_POSITIVE_VALUE",
            Self::ZeroCount => "ZERO_COUNT",
            Self::InvalidDay(_) => "INVALID_DAY",
        }
    }
}
