//! Product repository.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::{BinOper, Expr, Func};
use sea_orm::{
    Condition, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, TransactionTrait,
};
use tracing::warn;

use caixa_core::trade::{NewProductLine, service::new_product_spec};
use caixa_shared::types::ProductId;

use crate::entities::{compras, itens_compra, produtos};
use crate::repositories::stock::insert_product;

/// Input for registering a product outside a purchase.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Starting quantity.
    pub quantity: i32,
    /// Unit cost; repasse becomes cost × 1.3.
    pub cost_price: Decimal,
    /// Sale price.
    pub sale_price: Decimal,
    /// Date stored as last purchase.
    pub date: NaiveDate,
}

/// Product repository for CRUD operations and lookups.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Maximum number of search results.
    pub const SEARCH_LIMIT: u64 = 10;

    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a product with a generated code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateProductInput) -> Result<produtos::Model, DbErr> {
        let line = NewProductLine {
            description: input.description,
            category: input.category,
            quantity: input.quantity,
            cost_price: input.cost_price,
            sale_price: input.sale_price,
        };
        let spec = new_product_spec(&line, input.quantity, true, input.date);

        let txn = self.db.begin().await?;
        let product = insert_product(&txn, &spec).await?;
        txn.commit().await?;
        Ok(product)
    }

    /// Finds a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: ProductId) -> Result<Option<produtos::Model>, DbErr> {
        produtos::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Lists all products by description.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<produtos::Model>, DbErr> {
        produtos::Entity::find()
            .order_by_asc(produtos::Column::Descricao)
            .all(&self.db)
            .await
    }

    /// Case-insensitive search on description or code.
    ///
    /// Both sides are folded by the database's `lower()`, so an exact-case
    /// term always matches and case folding covers whatever the backend folds.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn search(&self, term: &str) -> Result<Vec<produtos::Model>, DbErr> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let pattern = format!("%{term}%");
        let folded = |column: produtos::Column| {
            Expr::expr(Func::lower(Expr::col(column)))
                .binary(BinOper::Like, Func::lower(Expr::val(pattern.clone())))
        };

        produtos::Entity::find()
            .filter(
                Condition::any()
                    .add(folded(produtos::Column::Descricao))
                    .add(folded(produtos::Column::Codigo)),
            )
            .order_by_asc(produtos::Column::Descricao)
            .limit(Self::SEARCH_LIMIT)
            .all(&self.db)
            .await
    }

    /// Cost price of the most recent purchase line with this description.
    ///
    /// The description must match the whole stored line, ignoring case as
    /// folded by the database.
    ///
    /// Lookup failures are logged and reported as `None`.
    pub async fn last_cost_price(&self, description: &str) -> Option<Decimal> {
        let result = itens_compra::Entity::find()
            .join(JoinType::InnerJoin, itens_compra::Relation::Compras.def())
            .filter(
                Expr::expr(Func::lower(Expr::col((itens_compra::Entity, itens_compra::Column::Descricao))))
                    .eq(Func::lower(Expr::val(description.trim()))),
            )
            .order_by_desc(compras::Column::DataCompra)
            .order_by_desc(compras::Column::CreatedAt)
            .one(&self.db)
            .await;

        match result {
            Ok(line) => line.map(|l| l.preco_custo),
            Err(e) => {
                warn!(error = %e, description, "Last cost price lookup failed");
                None
            }
        }
    }
}
