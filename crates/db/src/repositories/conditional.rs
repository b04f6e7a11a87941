//! Conditional (consignment) transfer repository.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use caixa_core::conditional::{
    Conditional, ConditionalDraft, ConditionalError, ConditionalItem, ConditionalService,
    ConditionalStatus, ItemResolution, ItemStatus,
};
use caixa_core::stock::MovementPlan;
use caixa_core::trade::LineProduct;
use caixa_shared::MissingProductPolicy;
use caixa_shared::types::{ConditionalId, ConditionalItemId, ProductId};

use crate::entities::sea_orm_active_enums::{StatusCondicional, StatusItemCondicional};
use crate::entities::{itens_condicionais, transacoes_condicionais};
use crate::repositories::counter::next_transaction_number;
use crate::repositories::stock::{StockError, apply_movement, insert_movement, insert_product};
use crate::repositories::trade::insert_settlement;

/// Error types for conditional transfer operations.
#[derive(Debug, thiserror::Error)]
pub enum ConditionalRepoError {
    /// Transfer not found.
    #[error("Condicional não encontrada: {0}")]
    NotFound(ConditionalId),

    /// Rejected by a business rule.
    #[error(transparent)]
    Rule(#[from] ConditionalError),

    /// Stock update failed.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A purchase or sale created while settling items.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SettlementRecord {
    /// Header ID of the purchase or sale.
    pub trade_id: Uuid,
    /// Its transaction number.
    pub number: i64,
}

/// Result of a resolution.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResolutionRecord {
    /// The transfer after the resolution.
    pub conditional: Conditional,
    /// Trades created for settled items.
    pub settlements: Vec<SettlementRecord>,
}

/// Conditional transfer repository.
#[derive(Debug, Clone)]
pub struct ConditionalRepository {
    db: DatabaseConnection,
    policy: MissingProductPolicy,
}

impl ConditionalRepository {
    /// Creates a new conditional repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, policy: MissingProductPolicy) -> Self {
        Self { db, policy }
    }

    /// Registers a transfer and moves stock in its direction.
    ///
    /// # Errors
    ///
    /// Returns `Rule` before any write when the draft is invalid, or `Stock`
    /// when a product is missing under the strict policy.
    pub async fn create(&self, draft: &ConditionalDraft) -> Result<Conditional, ConditionalRepoError> {
        let plan = ConditionalService::plan(draft)?;

        let txn = self.db.begin().await?;
        let number = next_transaction_number(&txn).await?;
        let id = ConditionalId::new();

        transacoes_condicionais::ActiveModel {
            id: Set(id.into_inner()),
            numero_transacao: Set(number),
            tipo: Set(plan.direction.into()),
            origem: Set(plan.origin.clone()),
            data_transacao: Set(plan.date),
            observacao: Set(plan.note.clone()),
            status: Set(StatusCondicional::Pendente),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        for line in &plan.lines {
            let product_id = match &line.product {
                LineProduct::New(spec) => {
                    let product = insert_product(&txn, spec).await?;
                    insert_movement(
                        &txn,
                        product.id,
                        plan.movement_kind,
                        line.quantity,
                        &plan.movement_note,
                    )
                    .await?;
                    Some(product.id)
                }
                LineProduct::Existing(product_id) => {
                    let movement = MovementPlan {
                        product_id: *product_id,
                        kind: plan.movement_kind,
                        quantity: line.quantity,
                        note: plan.movement_note.clone(),
                    };
                    apply_movement(&txn, &movement, self.policy)
                        .await?
                        .map(|_| product_id.into_inner())
                }
            };

            itens_condicionais::ActiveModel {
                id: Set(ConditionalItemId::new().into_inner()),
                transacao_id: Set(id.into_inner()),
                produto_id: Set(product_id),
                descricao: Set(line.description.clone()),
                categoria: Set(line.category.clone()),
                quantidade: Set(line.quantity),
                status: Set(ItemStatus::Pending.into()),
                valor_efetivado: Set(None),
                data_resolucao: Set(None),
            }
            .insert(&txn)
            .await?;
        }

        let conditional = load(&txn, id).await?;
        txn.commit().await?;

        info!(
            conditional_id = %id,
            number,
            direction = plan.direction.as_str(),
            origin = %plan.origin,
            "Conditional transfer registered"
        );
        Ok(conditional)
    }

    /// Transfers, newest first, with their items.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, limit: u64) -> Result<Vec<Conditional>, DbErr> {
        let headers = transacoes_condicionais::Entity::find()
            .order_by_desc(transacoes_condicionais::Column::DataTransacao)
            .order_by_desc(transacoes_condicionais::Column::NumeroTransacao)
            .limit(limit)
            .all(&self.db)
            .await?;

        let ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();
        let mut items = itens_condicionais::Entity::find()
            .filter(itens_condicionais::Column::TransacaoId.is_in(ids))
            .all(&self.db)
            .await?;
        items.sort_by(|a, b| a.descricao.cmp(&b.descricao));

        Ok(headers
            .into_iter()
            .map(|header| {
                let own = items
                    .iter()
                    .filter(|i| i.transacao_id == header.id)
                    .cloned()
                    .collect();
                to_conditional(header, own)
            })
            .collect())
    }

    /// One transfer with its items.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the transfer does not exist.
    pub async fn find(&self, id: ConditionalId) -> Result<Conditional, ConditionalRepoError> {
        load(&self.db, id).await
    }

    /// Resolves items of a pending transfer.
    ///
    /// Returned items move stock back; settled items with a value create a
    /// pending purchase or sale. The transfer becomes `resolvido` once no
    /// item is pending.
    ///
    /// # Errors
    ///
    /// Returns `Rule` when the transfer is not pending or a resolution is
    /// invalid. Nothing is written in that case.
    pub async fn resolve(
        &self,
        id: ConditionalId,
        resolutions: &[ItemResolution],
        today: NaiveDate,
    ) -> Result<ResolutionRecord, ConditionalRepoError> {
        let txn = self.db.begin().await?;
        let conditional = load(&txn, id).await?;
        let plan = ConditionalService::resolve(&conditional, resolutions, today)?;

        for update in &plan.item_updates {
            itens_condicionais::ActiveModel {
                id: Set(update.item_id.into_inner()),
                status: Set(update.status.into()),
                valor_efetivado: Set(update.settled_value),
                data_resolucao: Set(Some(update.resolved_on)),
                ..Default::default()
            }
            .update(&txn)
            .await?;
        }

        for movement in &plan.returns {
            apply_movement(&txn, movement, self.policy).await?;
        }

        let mut settlements = Vec::with_capacity(plan.settlements.len());
        for settlement in &plan.settlements {
            let (trade_id, number) = insert_settlement(&txn, settlement).await?;
            info!(
                conditional_id = %id,
                kind = %settlement.kind,
                number,
                total = %settlement.total,
                "Conditional item settled"
            );
            settlements.push(SettlementRecord { trade_id, number });
        }

        let still_pending = itens_condicionais::Entity::find()
            .filter(itens_condicionais::Column::TransacaoId.eq(id.into_inner()))
            .filter(itens_condicionais::Column::Status.eq(StatusItemCondicional::from(ItemStatus::Pending)))
            .count(&txn)
            .await?;
        if still_pending == 0 {
            set_status(&txn, id, ConditionalStatus::Resolved).await?;
        }

        let conditional = load(&txn, id).await?;
        txn.commit().await?;

        info!(
            conditional_id = %id,
            items = plan.item_updates.len(),
            returns = plan.returns.len(),
            settlements = settlements.len(),
            "Conditional transfer resolved"
        );
        Ok(ResolutionRecord {
            conditional,
            settlements,
        })
    }

    /// Cancels a pending transfer, moving stock of its pending items back.
    ///
    /// # Errors
    ///
    /// Returns `Rule(NotPending)` when the transfer was already closed.
    pub async fn cancel(&self, id: ConditionalId) -> Result<Conditional, ConditionalRepoError> {
        let txn = self.db.begin().await?;
        let conditional = load(&txn, id).await?;
        let movements = ConditionalService::cancel(&conditional)?;

        for movement in &movements {
            apply_movement(&txn, movement, self.policy).await?;
        }
        set_status(&txn, id, ConditionalStatus::Cancelled).await?;

        let conditional = load(&txn, id).await?;
        txn.commit().await?;

        info!(conditional_id = %id, reverted = movements.len(), "Conditional transfer cancelled");
        Ok(conditional)
    }
}

async fn set_status<C: ConnectionTrait>(
    conn: &C,
    id: ConditionalId,
    status: ConditionalStatus,
) -> Result<(), DbErr> {
    transacoes_condicionais::ActiveModel {
        id: Set(id.into_inner()),
        status: Set(status.into()),
        ..Default::default()
    }
    .update(conn)
    .await?;
    Ok(())
}

async fn load<C: ConnectionTrait>(
    conn: &C,
    id: ConditionalId,
) -> Result<Conditional, ConditionalRepoError> {
    let header = transacoes_condicionais::Entity::find_by_id(id.into_inner())
        .one(conn)
        .await?
        .ok_or(ConditionalRepoError::NotFound(id))?;
    let items = itens_condicionais::Entity::find()
        .filter(itens_condicionais::Column::TransacaoId.eq(id.into_inner()))
        .order_by_asc(itens_condicionais::Column::Descricao)
        .all(conn)
        .await?;
    Ok(to_conditional(header, items))
}

fn to_conditional(
    header: transacoes_condicionais::Model,
    items: Vec<itens_condicionais::Model>,
) -> Conditional {
    Conditional {
        id: ConditionalId::from_uuid(header.id),
        number: header.numero_transacao,
        direction: header.tipo.into(),
        origin: header.origem,
        date: header.data_transacao,
        note: header.observacao,
        status: header.status.into(),
        items: items
            .into_iter()
            .map(|i| ConditionalItem {
                id: ConditionalItemId::from_uuid(i.id),
                product_id: i.produto_id.map(ProductId::from_uuid),
                description: i.descricao,
                category: i.categoria,
                quantity: i.quantidade,
                status: i.status.into(),
                settled_value: i.valor_efetivado,
            })
            .collect(),
    }
}
