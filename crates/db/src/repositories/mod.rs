//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every multi-statement write runs inside one database transaction.

pub mod conditional;
pub mod cost_center;
mod counter;
pub mod ledger;
pub mod product;
pub mod stock;
pub mod trade;

pub use conditional::{
    ConditionalRepoError, ConditionalRepository, ResolutionRecord, SettlementRecord,
};
pub use cost_center::{CostCenterError, CostCenterFilter, CostCenterRepository};
pub use ledger::{BulkDeleteReport, LedgerError, LedgerFilter, LedgerRepository};
pub use product::{CreateProductInput, ProductRepository};
pub use stock::{ManualMovementInput, StockError, StockRepository};
pub use trade::{RecordedTrade, TradeDetail, TradeRepoError, TradeRepository};
