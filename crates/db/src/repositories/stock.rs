//! Stock ledger persistence: quantity updates and the movement log.

use chrono::Utc;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use caixa_core::stock::{MovementError, MovementKind, MovementPlan, StockLedger};
use caixa_core::trade::{NewProductSpec, product_code};
use caixa_shared::MissingProductPolicy;
use caixa_shared::types::ProductId;

use crate::entities::{movimentacoes_estoque, produtos};

/// Error types for stock operations.
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    /// Product not found.
    #[error("Produto não encontrado: {0}")]
    ProductNotFound(Uuid),

    /// Invalid manual movement.
    #[error(transparent)]
    Movement(#[from] MovementError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for a manual stock movement.
#[derive(Debug, Clone)]
pub struct ManualMovementInput {
    /// Product.
    pub product_id: ProductId,
    /// `entrada` adds, `saida` subtracts, `ajuste` sets the quantity.
    pub kind: MovementKind,
    /// Quantity moved, or the new on-hand quantity for `ajuste`.
    pub quantity: i32,
    /// Free-text note.
    pub note: String,
}

/// Stock repository for manual movements and the movement log.
#[derive(Debug, Clone)]
pub struct StockRepository {
    db: DatabaseConnection,
}

impl StockRepository {
    /// Number of movements returned by [`Self::recent_movements`].
    pub const RECENT_LIMIT: u64 = 50;

    /// Creates a new stock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a manual movement and returns the new on-hand quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is invalid, the product does not
    /// exist or the database operation fails.
    pub async fn record_manual(&self, input: ManualMovementInput) -> Result<i32, StockError> {
        StockLedger::validate(input.kind, input.quantity)?;

        let txn = self.db.begin().await?;
        let plan = MovementPlan {
            product_id: input.product_id,
            kind: input.kind,
            quantity: input.quantity,
            note: input.note,
        };
        let quantity = apply_movement(&txn, &plan, MissingProductPolicy::Strict)
            .await?
            .ok_or(StockError::ProductNotFound(plan.product_id.into_inner()))?;
        txn.commit().await?;

        info!(product_id = %plan.product_id, kind = %plan.kind, quantity, "Manual stock movement recorded");
        Ok(quantity)
    }

    /// Movement log of one product, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn movements_for(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<movimentacoes_estoque::Model>, DbErr> {
        movimentacoes_estoque::Entity::find()
            .filter(movimentacoes_estoque::Column::ProdutoId.eq(product_id.into_inner()))
            .order_by_desc(movimentacoes_estoque::Column::Data)
            .all(&self.db)
            .await
    }

    /// Most recent movements across all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent_movements(&self) -> Result<Vec<movimentacoes_estoque::Model>, DbErr> {
        movimentacoes_estoque::Entity::find()
            .order_by_desc(movimentacoes_estoque::Column::Data)
            .limit(Self::RECENT_LIMIT)
            .all(&self.db)
            .await
    }
}

/// Applies a movement to a product and appends it to the log.
///
/// Returns the new quantity, or `None` when the product is missing and the
/// policy is lenient (nothing is written in that case).
pub(crate) async fn apply_movement(
    txn: &DatabaseTransaction,
    plan: &MovementPlan,
    policy: MissingProductPolicy,
) -> Result<Option<i32>, StockError> {
    let product_id = plan.product_id.into_inner();
    let Some(product) = produtos::Entity::find_by_id(product_id).one(txn).await? else {
        return match policy {
            MissingProductPolicy::Lenient => {
                warn!(product_id = %product_id, kind = %plan.kind, quantity = plan.quantity, "Product not found, stock movement skipped");
                Ok(None)
            }
            MissingProductPolicy::Strict => Err(StockError::ProductNotFound(product_id)),
        };
    };

    let quantity = StockLedger::next_quantity(product.quantidade, plan.kind, plan.quantity);
    produtos::ActiveModel {
        id: Set(product_id),
        quantidade: Set(quantity),
        ..Default::default()
    }
    .update(txn)
    .await?;

    insert_movement(txn, product_id, plan.kind, plan.quantity, &plan.note).await?;
    Ok(Some(quantity))
}

/// Appends one row to the movement log.
pub(crate) async fn insert_movement(
    txn: &DatabaseTransaction,
    product_id: Uuid,
    kind: MovementKind,
    quantity: i32,
    note: &str,
) -> Result<movimentacoes_estoque::Model, DbErr> {
    movimentacoes_estoque::ActiveModel {
        id: Set(Uuid::new_v4()),
        produto_id: Set(product_id),
        tipo: Set(kind.into()),
        quantidade: Set(quantity),
        observacao: Set(note.to_string()),
        data: Set(Utc::now().into()),
    }
    .insert(txn)
    .await
}

/// Inserts a product registered inline, with a generated code.
pub(crate) async fn insert_product(
    txn: &DatabaseTransaction,
    spec: &NewProductSpec,
) -> Result<produtos::Model, DbErr> {
    let suffix: u16 = rand::rng().random_range(0..10_000);
    produtos::ActiveModel {
        id: Set(Uuid::new_v4()),
        codigo: Set(product_code(&spec.category, suffix)),
        descricao: Set(spec.description.clone()),
        categoria: Set(spec.category.clone()),
        quantidade: Set(spec.quantity),
        preco_custo: Set(spec.cost_price),
        valor_repasse: Set(spec.resale_price),
        preco_venda: Set(spec.sale_price),
        data_ultima_compra: Set(Some(spec.last_purchase_date)),
        created_at: Set(Utc::now().into()),
    }
    .insert(txn)
    .await
}
