//! Conditional (consignment) transfers.
//!
//! Goods received from or sent to a partner move stock immediately but have
//! no financial effect until each item is resolved: returned items move the
//! stock back, settled items become a purchase or a sale.

pub mod error;
pub mod service;
pub mod types;

pub use error::ConditionalError;
pub use service::ConditionalService;
pub use types::{
    Conditional, ConditionalDirection, ConditionalDraft, ConditionalItem, ConditionalPlan,
    ConditionalStatus, ItemResolution, ItemStatus, ItemUpdate, ResolutionPlan, SettlementPlan,
};
