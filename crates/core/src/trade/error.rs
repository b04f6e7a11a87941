//! Trade validation errors.

use thiserror::Error;

/// Errors raised while validating a purchase or sale, before any write.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TradeError {
    /// Purchase without supplier.
    #[error("Fornecedor é obrigatório")]
    MissingSupplier,

    /// Sale without customer.
    #[error("Cliente é obrigatório")]
    MissingCustomer,

    /// Empty checkout.
    #[error("Adicione pelo menos um item")]
    NoLines,

    /// A line has a blank description.
    #[error("Todos os itens devem ter descrição")]
    MissingDescription,

    /// A line has zero or negative quantity.
    #[error("Quantidade deve ser maior que 0")]
    NonPositiveQuantity,

    /// Cost price is zero or negative.
    #[error("Preço de custo deve ser maior que 0")]
    NonPositiveCost,

    /// Sale price is zero or negative.
    #[error("Preço de venda deve ser maior que 0")]
    NonPositiveSalePrice,

    /// Installment count is zero.
    #[error("Quantidade de parcelas deve ser pelo menos 1")]
    ZeroInstallments,
}

impl TradeError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSupplier => "MISSING_SUPPLIER",
            Self::MissingCustomer => "MISSING_CUSTOMER",
            Self::NoLines => "NO_LINES",
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::NonPositiveQuantity => "NON_POSITIVE_QUANTITY",
            Self::NonPositiveCost => "NON_POSITIVE_COST",
            Self::NonPositiveSalePrice => "NON_POSITIVE_SALE_PRICE",
            Self::ZeroInstallments => "ZERO_INSTALLMENTS",
        }
    }
}
