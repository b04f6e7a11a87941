//! Purchases and sales.
//!
//! Validates checkout drafts, computes totals and turns every line into the
//! product and stock writes the recorder performs. Lines are a tagged union:
//! a line either references an existing product or carries the data needed
//! to register a new one.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::TradeError;
pub use service::{RESALE_MARKUP, TradeService, product_code};
pub use types::{
    ExistingProductLine, InstallmentRow, LineProduct, NewProductLine, NewProductSpec,
    PaymentStatus, PaymentTerms, PlannedLine, TradeDraft, TradeKind, TradeLine, TradePlan,
    TradeSummary,
};
