//! Conditional transfer errors.

use rust_decimal::Decimal;
use thiserror::Error;

use caixa_shared::types::ConditionalItemId;

/// Errors raised by conditional transfer rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConditionalError {
    /// Origin/destination is blank.
    #[error("Origem é obrigatória")]
    MissingOrigin,

    /// No items.
    #[error("Adicione pelo menos um item")]
    NoLines,

    /// An item has a blank description.
    #[error("Todos os itens devem ter descrição")]
    MissingDescription,

    /// An item has zero or negative quantity.
    #[error("Quantidade deve ser maior que 0")]
    NonPositiveQuantity,

    /// A new-product item has no cost.
    #[error("Preço de custo deve ser maior que 0 para novos produtos")]
    NonPositiveCost,

    /// A new-product item has no sale price.
    #[error("Preço de venda deve ser maior que 0 para novos produtos")]
    NonPositiveSalePrice,

    /// The transfer was already resolved or cancelled.
    #[error("Transação condicional não está pendente")]
    NotPending,

    /// A resolution names an item of another transfer.
    #[error("Item {0} não pertence a esta transação")]
    UnknownItem(ConditionalItemId),

    /// The item was already returned or settled.
    #[error("Item {0} já foi resolvido")]
    ItemAlreadyResolved(ConditionalItemId),

    /// A resolution asks to put an item back to pending.
    #[error("Item {0} só pode ser devolvido ou efetivado")]
    PendingResolution(ConditionalItemId),

    /// Settlement value is negative.
    #[error("Valor efetivado inválido: {0}")]
    InvalidSettlementValue(Decimal),
}

impl ConditionalError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotPending | Self::ItemAlreadyResolved(_) => 409,
            _ => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingOrigin => "MISSING_ORIGIN",
            Self::NoLines => "NO_LINES",
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::NonPositiveQuantity => "NON_POSITIVE_QUANTITY",
            Self::NonPositiveCost => "NON_POSITIVE_COST",
            Self::NonPositiveSalePrice => "NON_POSITIVE_SALE_PRICE",
            Self::NotPending => "NOT_PENDING",
            Self::UnknownItem(_) => "UNKNOWN_ITEM",
            Self::ItemAlreadyResolved(_) => "ITEM_ALREADY_RESOLVED",
            Self::PendingResolution(_) => "PENDING_RESOLUTION",
            Self::InvalidSettlementValue(_) => "INVALID_SETTLEMENT_VALUE",
        }
    }
}
