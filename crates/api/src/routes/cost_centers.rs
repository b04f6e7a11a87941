//! Cost center routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde_json::json;

use caixa_core::cost_center::CostCenterDraft;
use caixa_db::repositories::{CostCenterFilter, CostCenterRepository};
use caixa_shared::types::CostCenterId;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the cost center routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cost-centers", get(list_cost_centers).post(create_cost_center))
        .route("/cost-centers/{id}", delete(delete_cost_center))
        .route("/cost-centers/{id}/name", get(cost_center_name))
}

/// GET `/cost-centers` - List cost centers by context, kind or name.
async fn list_cost_centers(
    State(state): State<AppState>,
    Query(filter): Query<CostCenterFilter>,
) -> ApiResult<impl IntoResponse> {
    let repo = CostCenterRepository::new((*state.db).clone());
    Ok(Json(repo.list(&filter).await?))
}

/// POST `/cost-centers` - Create a cost center.
async fn create_cost_center(
    State(state): State<AppState>,
    Json(draft): Json<CostCenterDraft>,
) -> ApiResult<impl IntoResponse> {
    let repo = CostCenterRepository::new((*state.db).clone());
    let created = repo.create(draft).await?;
    state.cache.clear();
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET `/cost-centers/{id}/name` - Display name, `null` when it cannot be read.
async fn cost_center_name(
    State(state): State<AppState>,
    Path(id): Path<CostCenterId>,
) -> impl IntoResponse {
    let repo = CostCenterRepository::new((*state.db).clone());
    Json(json!({ "id": id, "name": repo.name_of(id).await }))
}

/// DELETE `/cost-centers/{id}` - Hard-delete a cost center.
async fn delete_cost_center(
    State(state): State<AppState>,
    Path(id): Path<CostCenterId>,
) -> ApiResult<impl IntoResponse> {
    let repo = CostCenterRepository::new((*state.db).clone());
    repo.delete(id).await?;
    state.cache.clear();
    Ok(StatusCode::NO_CONTENT)
}
