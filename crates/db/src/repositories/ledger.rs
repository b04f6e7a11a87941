//! Ledger entry repository.
//!
//! Entries are always scoped by owner. The installment and recurrence
//! descriptors are stored as JSON documents (`{atual, total}` and
//! `{tipo, prazo, qtd, atual}` / `{tipo, dia}`) and rebuilt on read.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use caixa_core::calendar::month_window;
use caixa_core::cash::{CashService, DayBalance, TodaySummary};
use caixa_core::cost_center::CostCenterContext;
use caixa_core::payment::{
    PaymentAnswers, PaymentError, PaymentOutcome, PaymentService, PaymentWizard,
};
use caixa_core::schedule::{
    EntryEdit, EntryKind, EntryStatus, LedgerEntry, PlannedEntry, ScheduleError,
    ScheduleRequest, ScheduleService,
};
use caixa_shared::types::{CashBoxId, CostCenterId, LedgerEntryId, UserId};

use crate::entities::sea_orm_active_enums::{
    ContextoCentroCusto, StatusLancamento, TipoLancamento,
};
use crate::entities::{centros_de_custo, lancamentos_financeiros};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Entry not found for this user.
    #[error("Lançamento não encontrado: {0}")]
    NotFound(LedgerEntryId),

    /// Request failed schedule validation.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Payment was rejected.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filters for listing entries. Every field is optional.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct LedgerFilter {
    /// Only entries whose cost center belongs to this context.
    pub context: Option<CostCenterContext>,
    /// Only entries of this cost center.
    pub cost_center_id: Option<CostCenterId>,
    /// Only entries with this status.
    pub status: Option<EntryStatus>,
    /// Only entries of this direction.
    pub kind: Option<EntryKind>,
    /// Scheduled on or after.
    pub from: Option<NaiveDate>,
    /// Scheduled on or before.
    pub to: Option<NaiveDate>,
    /// Maximum number of rows.
    pub limit: Option<u64>,
}

/// Outcome of a bulk deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct BulkDeleteReport {
    /// Rows requested.
    pub requested: usize,
    /// Rows actually deleted.
    pub deleted: usize,
}

/// Ledger entry repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Expands a request into entries and inserts them all.
    ///
    /// # Errors
    ///
    /// Returns `Schedule` before any write if the request is invalid.
    pub async fn create(&self, request: &ScheduleRequest) -> Result<Vec<LedgerEntry>, LedgerError> {
        let planned = ScheduleService::generate(request)?;

        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(planned.len());
        for data in planned {
            let id = LedgerEntryId::new();
            to_active_model(id, &data).insert(&txn).await?;
            created.push(LedgerEntry { id, data });
        }
        txn.commit().await?;

        info!(
            user_id = %request.user_id,
            count = created.len(),
            value = %request.value,
            "Ledger entries created"
        );
        Ok(created)
    }

    /// Finds one entry of a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist or belongs to someone else.
    pub async fn find(&self, user_id: UserId, id: LedgerEntryId) -> Result<LedgerEntry, LedgerError> {
        find_owned(&self.db, user_id, id).await
    }

    /// Lists a user's entries, most recent due date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: UserId,
        filter: &LedgerFilter,
    ) -> Result<Vec<LedgerEntry>, DbErr> {
        let mut query = lancamentos_financeiros::Entity::find()
            .filter(condition_for(user_id, filter))
            .order_by_desc(lancamentos_financeiros::Column::DataPrevista)
            .order_by_desc(lancamentos_financeiros::Column::CreatedAt);
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        Ok(query.all(&self.db).await?.into_iter().map(from_model).collect())
    }

    /// Entries of a context scheduled inside `[from, to]`, in date order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn window(
        &self,
        user_id: UserId,
        context: CostCenterContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, DbErr> {
        let filter = LedgerFilter {
            context: Some(context),
            from: Some(from),
            to: Some(to),
            ..LedgerFilter::default()
        };
        let rows = lancamentos_financeiros::Entity::find()
            .filter(condition_for(user_id, &filter))
            .order_by_asc(lancamentos_financeiros::Column::DataPrevista)
            .order_by_asc(lancamentos_financeiros::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(from_model).collect())
    }

    /// Applies a manual edit.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown entry or `Schedule` for an invalid edit.
    pub async fn update(
        &self,
        user_id: UserId,
        id: LedgerEntryId,
        edit: &EntryEdit,
        today: NaiveDate,
    ) -> Result<LedgerEntry, LedgerError> {
        let txn = self.db.begin().await?;
        let entry = find_owned(&txn, user_id, id).await?;
        let data = ScheduleService::apply_edit(&entry, edit, today)?;

        let mut model = to_active_model(id, &data);
        model.created_at = sea_orm::ActiveValue::NotSet;
        model.update(&txn).await?;
        txn.commit().await?;

        info!(entry_id = %id, status = data.status.as_str(), "Ledger entry updated");
        Ok(LedgerEntry { id, data })
    }

    /// Deletes one entry. Stock is never touched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn delete(&self, user_id: UserId, id: LedgerEntryId) -> Result<(), LedgerError> {
        let result = lancamentos_financeiros::Entity::delete_many()
            .filter(lancamentos_financeiros::Column::Id.eq(id.into_inner()))
            .filter(lancamentos_financeiros::Column::UserId.eq(user_id.into_inner()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(LedgerError::NotFound(id));
        }
        info!(entry_id = %id, "Ledger entry deleted");
        Ok(())
    }

    /// Deletes entries one at a time, calling `on_progress(done, total)`
    /// after each row. A failed row is logged and the loop continues.
    pub async fn bulk_delete(
        &self,
        user_id: UserId,
        ids: &[LedgerEntryId],
        mut on_progress: impl FnMut(usize, usize),
    ) -> BulkDeleteReport {
        let mut report = BulkDeleteReport {
            requested: ids.len(),
            deleted: 0,
        };

        for (done, id) in ids.iter().enumerate() {
            match self.delete(user_id, *id).await {
                Ok(()) => report.deleted += 1,
                Err(e) => error!(error = %e, entry_id = %id, "Failed to delete ledger entry"),
            }
            on_progress(done + 1, ids.len());
        }

        debug!(requested = report.requested, deleted = report.deleted, "Bulk delete finished");
        report
    }

    /// Drives the payment wizard with the given answers and writes the result.
    ///
    /// Returns `Ok(None)` when the answers cancel the wizard; nothing is
    /// written in that case.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown entry and `Payment` when the answers
    /// are rejected or the entry is already realized.
    pub async fn pay(
        &self,
        user_id: UserId,
        id: LedgerEntryId,
        answers: &PaymentAnswers,
        today: NaiveDate,
    ) -> Result<Option<PaymentOutcome>, LedgerError> {
        let txn = self.db.begin().await?;
        let entry = find_owned(&txn, user_id, id).await?;

        let inputs = answers.inputs(entry.data.value);
        let Some(decision) = PaymentWizard::run(entry.data.value, inputs)? else {
            debug!(entry_id = %id, "Payment cancelled");
            return Ok(None);
        };
        let outcome = PaymentService::settle(&entry, &decision, today)?;

        lancamentos_financeiros::ActiveModel {
            id: Set(id.into_inner()),
            descricao: Set(outcome.realized.description.clone()),
            valor: Set(outcome.realized.value),
            status: Set(StatusLancamento::Realizado),
            data_lancamento: Set(Some(outcome.realized.realized_date)),
            parcelamento: Set(to_json(outcome.realized.installment.as_ref())),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        if let Some(remainder) = &outcome.remainder_entry {
            to_active_model(LedgerEntryId::new(), remainder).insert(&txn).await?;
        }
        txn.commit().await?;

        info!(
            entry_id = %id,
            paid = %outcome.realized.value,
            remainder = ?outcome.remainder_entry.as_ref().map(|e| e.value),
            "Ledger entry paid"
        );
        Ok(Some(outcome))
    }

    /// Realized balance of a context as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn real_cash(
        &self,
        user_id: UserId,
        context: CostCenterContext,
        today: NaiveDate,
    ) -> Result<Decimal, DbErr> {
        let filter = LedgerFilter {
            context: Some(context),
            status: Some(EntryStatus::Realized),
            ..LedgerFilter::default()
        };
        let entries = self.list(user_id, &filter).await?;
        Ok(CashService::real_cash(entries.iter().map(|e| &e.data), today))
    }

    /// Daily forecast for the month containing `month`, starting from the
    /// real cash balance as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn forecast(
        &self,
        user_id: UserId,
        context: CostCenterContext,
        month: NaiveDate,
        today: NaiveDate,
    ) -> Result<Vec<DayBalance>, DbErr> {
        let opening = self.real_cash(user_id, context, today).await?;
        let (from, to) = month_window(month);
        let entries = self.window(user_id, context, from, to).await?;
        Ok(CashService::daily_forecast(opening, entries.iter().map(|e| &e.data)))
    }

    /// Money in and out due today in a context.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn today(
        &self,
        user_id: UserId,
        context: CostCenterContext,
        today: NaiveDate,
    ) -> Result<TodaySummary, DbErr> {
        let entries = self.window(user_id, context, today, today).await?;
        Ok(CashService::today(entries.iter().map(|e| &e.data), today))
    }
}

async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    id: LedgerEntryId,
) -> Result<LedgerEntry, LedgerError> {
    lancamentos_financeiros::Entity::find_by_id(id.into_inner())
        .filter(lancamentos_financeiros::Column::UserId.eq(user_id.into_inner()))
        .one(conn)
        .await?
        .map(from_model)
        .ok_or(LedgerError::NotFound(id))
}

fn condition_for(user_id: UserId, filter: &LedgerFilter) -> Condition {
    use lancamentos_financeiros::Column;

    let mut condition = Condition::all().add(Column::UserId.eq(user_id.into_inner()));

    if let Some(context) = filter.context {
        condition = condition.add(
            Column::CentroCustoId.in_subquery(
                Query::select()
                    .column(centros_de_custo::Column::Id)
                    .from(centros_de_custo::Entity)
                    .and_where(centros_de_custo::Column::Contexto.eq(ContextoCentroCusto::from(context)))
                    .to_owned(),
            ),
        );
    }
    if let Some(cost_center_id) = filter.cost_center_id {
        condition = condition.add(Column::CentroCustoId.eq(cost_center_id.into_inner()));
    }
    if let Some(status) = filter.status {
        condition = condition.add(Column::Status.eq(StatusLancamento::from(status)));
    }
    if let Some(kind) = filter.kind {
        condition = condition.add(Column::Tipo.eq(TipoLancamento::from(kind)));
    }
    if let Some(from) = filter.from {
        condition = condition.add(Column::DataPrevista.gte(from));
    }
    if let Some(to) = filter.to {
        condition = condition.add(Column::DataPrevista.lte(to));
    }
    condition
}

fn to_json<T: Serialize>(descriptor: Option<&T>) -> Option<serde_json::Value> {
    descriptor.and_then(|d| serde_json::to_value(d).ok())
}

/// Rebuilds a stored descriptor. Unreadable documents are logged and dropped.
fn from_json<T: DeserializeOwned>(
    id: uuid::Uuid,
    column: &'static str,
    value: Option<serde_json::Value>,
) -> Option<T> {
    let value = value.filter(|v| !v.is_null())?;
    match serde_json::from_value(value) {
        Ok(descriptor) => Some(descriptor),
        Err(e) => {
            warn!(entry_id = %id, column, error = %e, "Ignoring unreadable descriptor");
            None
        }
    }
}

fn to_active_model(id: LedgerEntryId, data: &PlannedEntry) -> lancamentos_financeiros::ActiveModel {
    lancamentos_financeiros::ActiveModel {
        id: Set(id.into_inner()),
        user_id: Set(data.user_id.into_inner()),
        descricao: Set(data.description.clone()),
        valor: Set(data.value),
        tipo: Set(data.kind.into()),
        data_prevista: Set(data.scheduled_date),
        data_lancamento: Set(data.realized_date),
        centro_custo_id: Set(data.cost_center_id.map(CostCenterId::into_inner)),
        caixa_id: Set(data.cash_box_id.map(CashBoxId::into_inner)),
        status: Set(data.status.into()),
        origem: Set(data.origin.clone()),
        parcelamento: Set(to_json(data.installment.as_ref())),
        recorrencia: Set(to_json(data.recurrence.as_ref())),
        created_at: Set(Utc::now().into()),
    }
}

fn from_model(model: lancamentos_financeiros::Model) -> LedgerEntry {
    let installment = from_json(model.id, "parcelamento", model.parcelamento);
    let recurrence = from_json(model.id, "recorrencia", model.recorrencia);

    LedgerEntry {
        id: LedgerEntryId::from_uuid(model.id),
        data: PlannedEntry {
            user_id: UserId::from_uuid(model.user_id),
            description: model.descricao,
            value: model.valor,
            kind: model.tipo.into(),
            scheduled_date: model.data_prevista,
            realized_date: model.data_lancamento,
            status: model.status.into(),
            cost_center_id: model.centro_custo_id.map(CostCenterId::from_uuid),
            cash_box_id: model.caixa_id.map(CashBoxId::from_uuid),
            origin: model.origem,
            installment,
            recurrence,
        },
    }
}
