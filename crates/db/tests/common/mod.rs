//! Shared setup for repository integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use caixa_db::entities::produtos;
use caixa_db::migration::{Migrator, MigratorTrait};
use caixa_db::repositories::{CreateProductInput, ProductRepository};
use caixa_shared::types::ProductId;

/// Fresh in-memory database with the schema applied.
///
/// A single pooled connection keeps the in-memory database alive and
/// shared by every query of the test.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Registers a product with `quantity` on hand.
pub async fn product(db: &DatabaseConnection, description: &str, quantity: i32) -> produtos::Model {
    ProductRepository::new(db.clone())
        .create(CreateProductInput {
            description: description.to_string(),
            category: "ROUPAS".to_string(),
            quantity,
            cost_price: Decimal::from(10),
            sale_price: Decimal::from(25),
            date: day(2024, 1, 2),
        })
        .await
        .expect("create product")
}

/// Current on-hand quantity of a product.
pub async fn on_hand(db: &DatabaseConnection, id: uuid::Uuid) -> i32 {
    ProductRepository::new(db.clone())
        .find_by_id(ProductId::from_uuid(id))
        .await
        .unwrap()
        .expect("product exists")
        .quantidade
}
