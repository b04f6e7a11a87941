//! Ledger entry routes: create, list, edit, delete and pay.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use caixa_core::payment::PaymentAnswers;
use caixa_core::schedule::{EntryEdit, EntryKind, SchedulePlan, ScheduleRequest};
use caixa_db::repositories::{LedgerFilter, LedgerRepository};
use caixa_shared::types::{CashBoxId, CostCenterId, LedgerEntryId};

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::routes::cash::refresh_after_ledger_change;
use crate::AppState;

/// Creates the ledger routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ledger/entries", get(list_entries).post(create_entries))
        .route("/ledger/entries/bulk-delete", post(bulk_delete))
        .route(
            "/ledger/entries/{id}",
            patch(update_entry).delete(delete_entry),
        )
        .route("/ledger/entries/{id}/payment", post(pay_entry))
}

/// Request body for registering money in or out.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// Free text.
    pub description: String,
    /// Total value.
    pub value: Decimal,
    /// `entrada` or `saida`.
    pub kind: EntryKind,
    /// First due date.
    pub date: NaiveDate,
    /// Classification.
    pub cost_center_id: Option<CostCenterId>,
    /// Cash box.
    pub cash_box_id: Option<CashBoxId>,
    /// Single, installments, recurring, monthly or yearly.
    #[serde(default)]
    pub plan: SchedulePlan,
}

/// Request body for bulk deletion.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    /// Entries to delete, in order.
    pub ids: Vec<LedgerEntryId>,
}

/// GET `/ledger/entries` - List the user's entries.
async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<LedgerFilter>,
) -> ApiResult<impl IntoResponse> {
    let repo = LedgerRepository::new((*state.db).clone());
    Ok(Json(repo.list(auth.user_id(), &filter).await?))
}

/// POST `/ledger/entries` - Register one entry or a whole schedule.
async fn create_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateEntryRequest>,
) -> ApiResult<impl IntoResponse> {
    let request = ScheduleRequest {
        user_id: auth.user_id(),
        description: body.description,
        value: body.value,
        kind: body.kind,
        date: body.date,
        cost_center_id: body.cost_center_id,
        cash_box_id: body.cash_box_id,
        plan: body.plan,
    };

    let repo = LedgerRepository::new((*state.db).clone());
    let created = repo.create(&request).await?;
    refresh_after_ledger_change(&state, auth.user_id()).await;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH `/ledger/entries/{id}` - Edit an entry.
async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<LedgerEntryId>,
    Json(edit): Json<EntryEdit>,
) -> ApiResult<impl IntoResponse> {
    let repo = LedgerRepository::new((*state.db).clone());
    let updated = repo.update(auth.user_id(), id, &edit, state.today()).await?;
    refresh_after_ledger_change(&state, auth.user_id()).await;
    Ok(Json(updated))
}

/// DELETE `/ledger/entries/{id}` - Delete an entry.
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<LedgerEntryId>,
) -> ApiResult<impl IntoResponse> {
    let repo = LedgerRepository::new((*state.db).clone());
    repo.delete(auth.user_id(), id).await?;
    refresh_after_ledger_change(&state, auth.user_id()).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/ledger/entries/bulk-delete` - Delete entries one at a time.
async fn bulk_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<BulkDeleteRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = LedgerRepository::new((*state.db).clone());
    let report = repo
        .bulk_delete(auth.user_id(), &body.ids, |done, total| {
            debug!(done, total, "Bulk delete progress");
        })
        .await;
    refresh_after_ledger_change(&state, auth.user_id()).await;
    Ok(Json(report))
}

/// POST `/ledger/entries/{id}/payment` - Pay an entry in full or in part.
async fn pay_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<LedgerEntryId>,
    Json(answers): Json<PaymentAnswers>,
) -> ApiResult<impl IntoResponse> {
    let repo = LedgerRepository::new((*state.db).clone());
    let Some(outcome) = repo
        .pay(auth.user_id(), id, &answers, state.today())
        .await?
    else {
        return Ok(Json(json!({ "status": "cancelled" })));
    };

    refresh_after_ledger_change(&state, auth.user_id()).await;
    Ok(Json(json!({
        "status": "processed",
        "realized": outcome.realized,
        "remainder_entry": outcome.remainder_entry,
    })))
}
