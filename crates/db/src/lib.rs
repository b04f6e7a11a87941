//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the wire tables
//! - Repository abstractions for data access
//! - Database migrations
//! - The per-context financial cache

pub mod cache;
pub mod entities;
pub mod migration;
pub mod repositories;

pub use cache::{CacheEvent, ContextSnapshot, FinancialCache};
pub use repositories::{
    ConditionalRepository, CostCenterRepository, LedgerRepository, ProductRepository,
    StockRepository, TradeRepository,
};

use std::time::Duration;

use caixa_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}
