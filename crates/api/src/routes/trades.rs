//! Purchase and sale routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use caixa_core::trade::{PaymentTerms, TradeDraft, TradeKind, TradeLine};
use caixa_db::repositories::{RecordedTrade, TradeDetail, TradeRepository};

use crate::AppState;
use crate::error::ApiResult;

const LIST_LIMIT: u64 = 100;

/// Creates the trade routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/purchases", get(list_purchases).post(record_purchase))
        .route(
            "/purchases/{id}",
            get(get_purchase).delete(delete_purchase),
        )
        .route("/purchases/{id}/paid", post(mark_purchase_paid))
        .route("/sales", get(list_sales).post(record_sale))
        .route("/sales/{id}", get(get_sale).delete(delete_sale))
        .route("/sales/{id}/paid", post(mark_sale_paid))
        .route("/trades/installments", get(list_installments))
}

/// Checkout request body. The kind comes from the route.
#[derive(Debug, Deserialize)]
pub struct TradeRequest {
    /// Supplier or customer.
    pub counterparty: String,
    /// Trade date.
    pub date: NaiveDate,
    /// Lines.
    pub lines: Vec<TradeLine>,
    /// Payment terms.
    #[serde(default)]
    pub terms: PaymentTerms,
}

impl TradeRequest {
    fn into_draft(self, kind: TradeKind) -> TradeDraft {
        TradeDraft {
            kind,
            counterparty: self.counterparty,
            date: self.date,
            lines: self.lines,
            terms: self.terms,
        }
    }
}

fn repository(state: &AppState) -> TradeRepository {
    TradeRepository::new((*state.db).clone(), state.missing_product)
}

async fn record(state: &AppState, draft: TradeDraft) -> ApiResult<(StatusCode, Json<RecordedTrade>)> {
    let recorded = repository(state).record(&draft).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

async fn detail(state: &AppState, kind: TradeKind, id: Uuid) -> ApiResult<Json<TradeDetail>> {
    Ok(Json(repository(state).find(kind, id).await?))
}

async fn remove(state: &AppState, kind: TradeKind, id: Uuid) -> ApiResult<StatusCode> {
    repository(state).delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_paid(state: &AppState, kind: TradeKind, id: Uuid) -> ApiResult<StatusCode> {
    repository(state).mark_paid(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/purchases` - Most recent purchases.
async fn list_purchases(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(repository(&state).list_purchases(LIST_LIMIT).await?))
}

/// POST `/purchases` - Record a purchase.
async fn record_purchase(
    State(state): State<AppState>,
    Json(body): Json<TradeRequest>,
) -> ApiResult<impl IntoResponse> {
    record(&state, body.into_draft(TradeKind::Purchase)).await
}

/// GET `/purchases/{id}` - Purchase with its items.
async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    detail(&state, TradeKind::Purchase, id).await
}

/// DELETE `/purchases/{id}` - Delete a purchase and reverse its stock.
async fn delete_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    remove(&state, TradeKind::Purchase, id).await
}

/// POST `/purchases/{id}/paid` - Mark a purchase as paid.
async fn mark_purchase_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    mark_paid(&state, TradeKind::Purchase, id).await
}

/// GET `/sales` - Most recent sales.
async fn list_sales(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(repository(&state).list_sales(LIST_LIMIT).await?))
}

/// POST `/sales` - Record a sale.
async fn record_sale(
    State(state): State<AppState>,
    Json(body): Json<TradeRequest>,
) -> ApiResult<impl IntoResponse> {
    record(&state, body.into_draft(TradeKind::Sale)).await
}

/// GET `/sales/{id}` - Sale with its items.
async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    detail(&state, TradeKind::Sale, id).await
}

/// DELETE `/sales/{id}` - Delete a sale and reverse its stock.
async fn delete_sale(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    remove(&state, TradeKind::Sale, id).await
}

/// POST `/sales/{id}/paid` - Mark a sale as paid.
async fn mark_sale_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    mark_paid(&state, TradeKind::Sale, id).await
}

/// GET `/trades/installments` - Installment view of recent trades.
async fn list_installments(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(repository(&state).installment_rows().await?))
}
