//! Purchase and sale repository.
//!
//! Recording a checkout writes the header, one item per line and one stock
//! movement per line inside a single database transaction. Deleting a
//! purchase or sale reverses the stock of every line before removing it.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use caixa_core::calendar::Cadence;
use caixa_core::conditional::SettlementPlan;
use caixa_core::stock::MovementPlan;
use caixa_core::trade::{
    InstallmentRow, LineProduct, PaymentStatus, PlannedLine, TradeDraft, TradeError, TradeKind,
    TradeService, TradeSummary,
};
use caixa_shared::MissingProductPolicy;
use caixa_shared::types::ProductId;

use crate::entities::sea_orm_active_enums::StatusPagamento;
use crate::entities::{compras, itens_compra, itens_venda, vendas};
use crate::repositories::counter::next_transaction_number;
use crate::repositories::stock::{StockError, apply_movement, insert_movement, insert_product};

/// Payment method stored on every header.
const PAYMENT_METHOD: &str = "dinheiro";

/// Error types for purchase/sale operations.
#[derive(Debug, thiserror::Error)]
pub enum TradeRepoError {
    /// Purchase or sale not found.
    #[error("{0} não encontrada: {1}")]
    NotFound(TradeKind, Uuid),

    /// Draft failed validation.
    #[error(transparent)]
    Validation(#[from] TradeError),

    /// Stock update failed.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result of recording a checkout.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RecordedTrade {
    /// Header ID.
    pub id: Uuid,
    /// Transaction number.
    pub number: i64,
    /// Total value.
    pub total: Decimal,
    /// Lines whose product could not be read (stored without product).
    pub skipped_lines: usize,
}

/// A header with its items, for either table.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradeDetail {
    /// Purchase header and items.
    Purchase {
        /// Header.
        header: compras::Model,
        /// Items.
        items: Vec<itens_compra::Model>,
    },
    /// Sale header and items.
    Sale {
        /// Header.
        header: vendas::Model,
        /// Items.
        items: Vec<itens_venda::Model>,
    },
}

/// Header fields shared by both tables.
struct HeaderValues<'a> {
    number: i64,
    date: NaiveDate,
    counterparty: &'a str,
    total: Decimal,
    item_count: i32,
    status: PaymentStatus,
    installments: i32,
    cadence: Cadence,
}

/// Item fields shared by both tables.
struct ItemValues<'a> {
    product_id: Option<Uuid>,
    description: &'a str,
    category: &'a str,
    quantity: i32,
    cost_price: Decimal,
    sale_price: Decimal,
}

impl<'a> ItemValues<'a> {
    fn from_line(line: &'a PlannedLine, product_id: Option<Uuid>) -> Self {
        Self {
            product_id,
            description: line.description.as_str(),
            category: line.category.as_str(),
            quantity: line.quantity,
            cost_price: line.cost_price,
            sale_price: line.sale_price,
        }
    }
}

/// Purchase/sale repository.
#[derive(Debug, Clone)]
pub struct TradeRepository {
    db: DatabaseConnection,
    policy: MissingProductPolicy,
}

impl TradeRepository {
    /// Number of headers expanded by [`Self::installment_rows`].
    pub const INSTALLMENT_VIEW_LIMIT: u64 = 50;

    /// Creates a new trade repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, policy: MissingProductPolicy) -> Self {
        Self { db, policy }
    }

    /// Validates and records a purchase or sale.
    ///
    /// # Errors
    ///
    /// Returns `Validation` before any write when the draft is invalid,
    /// `Stock` when a product is missing under the strict policy, or
    /// `Database` when a statement fails. Nothing is kept on error.
    pub async fn record(&self, draft: &TradeDraft) -> Result<RecordedTrade, TradeRepoError> {
        let plan = TradeService::plan(draft)?;

        let txn = self.db.begin().await?;
        let number = next_transaction_number(&txn).await?;
        let header = HeaderValues {
            number,
            date: plan.date,
            counterparty: &plan.counterparty,
            total: plan.total,
            item_count: plan.item_count,
            status: plan.terms.status,
            installments: i32::try_from(plan.terms.installments).unwrap_or(i32::MAX),
            cadence: plan.terms.cadence,
        };
        let header_id = insert_header(&txn, plan.kind, &header).await?;

        let mut skipped_lines = 0;
        for line in &plan.lines {
            let product_id = match &line.product {
                LineProduct::New(spec) => {
                    let product = insert_product(&txn, spec).await?;
                    insert_movement(&txn, product.id, plan.movement_kind, line.quantity, &plan.note)
                        .await?;
                    Some(product.id)
                }
                LineProduct::Existing(id) => {
                    let movement = MovementPlan {
                        product_id: *id,
                        kind: plan.movement_kind,
                        quantity: line.quantity,
                        note: plan.note.clone(),
                    };
                    if apply_movement(&txn, &movement, self.policy).await?.is_some() {
                        Some(id.into_inner())
                    } else {
                        skipped_lines += 1;
                        None
                    }
                }
            };
            insert_item(&txn, plan.kind, header_id, &ItemValues::from_line(line, product_id))
                .await?;
        }

        txn.commit().await?;

        info!(
            kind = %plan.kind,
            number,
            total = %plan.total,
            lines = plan.lines.len(),
            "Trade recorded"
        );

        Ok(RecordedTrade {
            id: header_id,
            number,
            total: plan.total,
            skipped_lines,
        })
    }

    /// Deletes a purchase or sale, reversing the stock of every line.
    ///
    /// Lines without a product, or whose product no longer exists under the
    /// lenient policy, are removed without a stock change.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the header does not exist.
    pub async fn delete(&self, kind: TradeKind, id: Uuid) -> Result<(), TradeRepoError> {
        let txn = self.db.begin().await?;

        let (number, lines) = match kind {
            TradeKind::Purchase => {
                let header = compras::Entity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or(TradeRepoError::NotFound(kind, id))?;
                let items = itens_compra::Entity::find()
                    .filter(itens_compra::Column::CompraId.eq(id))
                    .all(&txn)
                    .await?;
                let lines: Vec<_> = items.iter().map(|i| (i.produto_id, i.quantidade)).collect();
                itens_compra::Entity::delete_many()
                    .filter(itens_compra::Column::CompraId.eq(id))
                    .exec(&txn)
                    .await?;
                compras::Entity::delete_by_id(id).exec(&txn).await?;
                (header.numero_transacao, lines)
            }
            TradeKind::Sale => {
                let header = vendas::Entity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or(TradeRepoError::NotFound(kind, id))?;
                let items = itens_venda::Entity::find()
                    .filter(itens_venda::Column::VendaId.eq(id))
                    .all(&txn)
                    .await?;
                let lines: Vec<_> = items.iter().map(|i| (i.produto_id, i.quantidade)).collect();
                itens_venda::Entity::delete_many()
                    .filter(itens_venda::Column::VendaId.eq(id))
                    .exec(&txn)
                    .await?;
                vendas::Entity::delete_by_id(id).exec(&txn).await?;
                (header.numero_transacao, lines)
            }
        };

        for (product_id, quantity) in lines {
            let Some(product_id) = product_id else {
                warn!(kind = %kind, number, "Line without product, no stock reversal");
                continue;
            };
            let undo = TradeService::reversal(kind, number, ProductId::from_uuid(product_id), quantity);
            apply_movement(&txn, &undo, self.policy).await?;
        }

        txn.commit().await?;
        info!(kind = %kind, number, "Trade deleted and stock reversed");
        Ok(())
    }

    /// Sets the payment status of a purchase or sale to `pago`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the header does not exist.
    pub async fn mark_paid(&self, kind: TradeKind, id: Uuid) -> Result<(), TradeRepoError> {
        let result = match kind {
            TradeKind::Purchase => {
                compras::Entity::update_many()
                    .col_expr(
                        compras::Column::StatusPagamento,
                        sea_orm::sea_query::Expr::value(StatusPagamento::Pago),
                    )
                    .filter(compras::Column::Id.eq(id))
                    .exec(&self.db)
                    .await?
            }
            TradeKind::Sale => {
                vendas::Entity::update_many()
                    .col_expr(
                        vendas::Column::StatusPagamento,
                        sea_orm::sea_query::Expr::value(StatusPagamento::Pago),
                    )
                    .filter(vendas::Column::Id.eq(id))
                    .exec(&self.db)
                    .await?
            }
        };

        if result.rows_affected == 0 {
            return Err(TradeRepoError::NotFound(kind, id));
        }
        Ok(())
    }

    /// Purchases, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_purchases(&self, limit: u64) -> Result<Vec<compras::Model>, DbErr> {
        compras::Entity::find()
            .order_by_desc(compras::Column::DataCompra)
            .order_by_desc(compras::Column::NumeroTransacao)
            .limit(limit)
            .all(&self.db)
            .await
    }

    /// Sales, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_sales(&self, limit: u64) -> Result<Vec<vendas::Model>, DbErr> {
        vendas::Entity::find()
            .order_by_desc(vendas::Column::DataVenda)
            .order_by_desc(vendas::Column::NumeroTransacao)
            .limit(limit)
            .all(&self.db)
            .await
    }

    /// A purchase or sale with its items.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the header does not exist.
    pub async fn find(&self, kind: TradeKind, id: Uuid) -> Result<TradeDetail, TradeRepoError> {
        match kind {
            TradeKind::Purchase => {
                let header = compras::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .ok_or(TradeRepoError::NotFound(kind, id))?;
                let items = itens_compra::Entity::find()
                    .filter(itens_compra::Column::CompraId.eq(id))
                    .all(&self.db)
                    .await?;
                Ok(TradeDetail::Purchase { header, items })
            }
            TradeKind::Sale => {
                let header = vendas::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .ok_or(TradeRepoError::NotFound(kind, id))?;
                let items = itens_venda::Entity::find()
                    .filter(itens_venda::Column::VendaId.eq(id))
                    .all(&self.db)
                    .await?;
                Ok(TradeDetail::Sale { header, items })
            }
        }
    }

    /// Installment rows of the most recent purchases and sales.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn installment_rows(&self) -> Result<Vec<InstallmentRow>, DbErr> {
        let limit = Self::INSTALLMENT_VIEW_LIMIT;
        let mut summaries: Vec<TradeSummary> = self
            .list_purchases(limit)
            .await?
            .into_iter()
            .map(|c| TradeSummary {
                kind: TradeKind::Purchase,
                number: c.numero_transacao,
                date: c.data_compra,
                counterparty: c.fornecedor,
                total: c.total,
                status: c.status_pagamento.into(),
                installments: u32::try_from(c.quantidade_parcelas).unwrap_or(1),
                cadence: c.prazoparcelas.into(),
            })
            .chain(self.list_sales(limit).await?.into_iter().map(|v| TradeSummary {
                kind: TradeKind::Sale,
                number: v.numero_transacao,
                date: v.data_venda,
                counterparty: v.cliente,
                total: v.total,
                status: v.status_pagamento.into(),
                installments: u32::try_from(v.quantidade_parcelas).unwrap_or(1),
                cadence: v.prazoparcelas.into(),
            }))
            .collect();

        summaries.sort_by(|a, b| b.date.cmp(&a.date).then(b.number.cmp(&a.number)));
        summaries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(TradeService::installment_rows(&summaries))
    }
}

async fn insert_header(
    txn: &DatabaseTransaction,
    kind: TradeKind,
    header: &HeaderValues<'_>,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    let now = Utc::now().into();

    match kind {
        TradeKind::Purchase => {
            compras::ActiveModel {
                id: Set(id),
                numero_transacao: Set(header.number),
                data_compra: Set(header.date),
                fornecedor: Set(header.counterparty.to_string()),
                total: Set(header.total),
                quantidade_itens: Set(header.item_count),
                forma_pagamento: Set(PAYMENT_METHOD.to_string()),
                status_pagamento: Set(header.status.into()),
                quantidade_parcelas: Set(header.installments),
                prazoparcelas: Set(header.cadence.into()),
                created_at: Set(now),
            }
            .insert(txn)
            .await?;
        }
        TradeKind::Sale => {
            vendas::ActiveModel {
                id: Set(id),
                numero_transacao: Set(header.number),
                data_venda: Set(header.date),
                cliente: Set(header.counterparty.to_string()),
                total: Set(header.total),
                quantidade_itens: Set(header.item_count),
                forma_pagamento: Set(PAYMENT_METHOD.to_string()),
                status_pagamento: Set(header.status.into()),
                quantidade_parcelas: Set(header.installments),
                prazoparcelas: Set(header.cadence.into()),
                created_at: Set(now),
            }
            .insert(txn)
            .await?;
        }
    }

    Ok(id)
}

async fn insert_item(
    txn: &DatabaseTransaction,
    kind: TradeKind,
    header_id: Uuid,
    item: &ItemValues<'_>,
) -> Result<(), DbErr> {
    match kind {
        TradeKind::Purchase => {
            itens_compra::ActiveModel {
                id: Set(Uuid::new_v4()),
                compra_id: Set(header_id),
                produto_id: Set(item.product_id),
                descricao: Set(item.description.to_string()),
                quantidade: Set(item.quantity),
                categoria: Set(item.category.to_string()),
                preco_custo: Set(item.cost_price),
                preco_venda: Set(item.sale_price),
            }
            .insert(txn)
            .await?;
        }
        TradeKind::Sale => {
            itens_venda::ActiveModel {
                id: Set(Uuid::new_v4()),
                venda_id: Set(header_id),
                produto_id: Set(item.product_id),
                descricao: Set(item.description.to_string()),
                quantidade: Set(item.quantity),
                preco_venda: Set(item.sale_price),
            }
            .insert(txn)
            .await?;
        }
    }
    Ok(())
}

/// Writes the purchase or sale that settles a conditional item.
///
/// The trade is pending, in one monthly installment, with a single line at
/// the settled unit price. Stock is not touched: the goods already moved
/// when the transfer was registered.
pub(crate) async fn insert_settlement(
    txn: &DatabaseTransaction,
    settlement: &SettlementPlan,
) -> Result<(Uuid, i64), DbErr> {
    let number = next_transaction_number(txn).await?;
    let header = HeaderValues {
        number,
        date: settlement.date,
        counterparty: &settlement.counterparty,
        total: settlement.total,
        item_count: 1,
        status: PaymentStatus::Pending,
        installments: 1,
        cadence: Cadence::Monthly,
    };
    let header_id = insert_header(txn, settlement.kind, &header).await?;

    let (cost_price, sale_price) = match settlement.kind {
        TradeKind::Purchase => (settlement.unit_price, Decimal::ZERO),
        TradeKind::Sale => (Decimal::ZERO, settlement.unit_price),
    };
    let item = ItemValues {
        product_id: settlement.product_id.map(ProductId::into_inner),
        description: &settlement.description,
        category: &settlement.category,
        quantity: settlement.quantity,
        cost_price,
        sale_price,
    };
    insert_item(txn, settlement.kind, header_id, &item).await?;

    Ok((header_id, number))
}
