//! Conditional (consignment) routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use caixa_core::conditional::{ConditionalDraft, ItemResolution};
use caixa_db::repositories::ConditionalRepository;
use caixa_shared::types::ConditionalId;

use crate::AppState;
use crate::error::ApiResult;

const LIST_LIMIT: u64 = 100;

/// Creates the conditional routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/conditionals", get(list_conditionals).post(create_conditional))
        .route("/conditionals/{id}", get(get_conditional))
        .route("/conditionals/{id}/resolve", post(resolve_conditional))
        .route("/conditionals/{id}/cancel", post(cancel_conditional))
}

/// Request body for resolving items.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Resolutions, one per item.
    pub items: Vec<ItemResolution>,
}

fn repository(state: &AppState) -> ConditionalRepository {
    ConditionalRepository::new((*state.db).clone(), state.missing_product)
}

/// GET `/conditionals` - Most recent transfers.
async fn list_conditionals(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(repository(&state).list(LIST_LIMIT).await?))
}

/// POST `/conditionals` - Register a transfer and move its stock.
async fn create_conditional(
    State(state): State<AppState>,
    Json(draft): Json<ConditionalDraft>,
) -> ApiResult<impl IntoResponse> {
    let created = repository(&state).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET `/conditionals/{id}` - Transfer with its items.
async fn get_conditional(
    State(state): State<AppState>,
    Path(id): Path<ConditionalId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repository(&state).find(id).await?))
}

/// POST `/conditionals/{id}/resolve` - Return or settle items.
async fn resolve_conditional(
    State(state): State<AppState>,
    Path(id): Path<ConditionalId>,
    Json(body): Json<ResolveRequest>,
) -> ApiResult<impl IntoResponse> {
    let record = repository(&state)
        .resolve(id, &body.items, state.today())
        .await?;
    Ok(Json(record))
}

/// POST `/conditionals/{id}/cancel` - Cancel and undo the stock moves.
async fn cancel_conditional(
    State(state): State<AppState>,
    Path(id): Path<ConditionalId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repository(&state).cancel(id).await?))
}
