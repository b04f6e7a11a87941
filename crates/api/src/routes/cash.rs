//! Cash routes backed by the financial cache.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use caixa_core::cost_center::CostCenterContext;
use caixa_db::repositories::LedgerRepository;
use caixa_shared::types::UserId;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

const CONTEXTS: [CostCenterContext; 2] = [CostCenterContext::House, CostCenterContext::Store];

/// Creates the cash routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cash/{context}", get(get_snapshot))
        .route("/cash/{context}/reload", post(reload_snapshot))
        .route("/cash/{context}/forecast", get(get_forecast))
}

/// Query parameters for the forecast.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Month as `YYYY-MM`. Defaults to the current month.
    pub month: Option<String>,
}

/// GET `/cash/{context}` - Cached snapshot, loaded on first use.
async fn get_snapshot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(context): Path<CostCenterContext>,
) -> ApiResult<impl IntoResponse> {
    let snapshot = state
        .cache
        .snapshot(auth.user_id(), context, state.today())
        .await?;
    Ok(Json((*snapshot).clone()))
}

/// POST `/cash/{context}/reload` - Refetch everything for a context.
async fn reload_snapshot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(context): Path<CostCenterContext>,
) -> ApiResult<impl IntoResponse> {
    let snapshot = state
        .cache
        .reload(auth.user_id(), context, state.today())
        .await?;
    Ok(Json((*snapshot).clone()))
}

/// GET `/cash/{context}/forecast?month=YYYY-MM` - Daily balance forecast.
async fn get_forecast(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(context): Path<CostCenterContext>,
    Query(query): Query<ForecastQuery>,
) -> ApiResult<impl IntoResponse> {
    let today = state.today();
    let month = match query.month.as_deref() {
        Some(month) => parse_month(month)
            .ok_or_else(|| ApiError::bad_request(format!("Mês inválido: {month}")))?,
        None => today,
    };

    let repo = LedgerRepository::new((*state.db).clone());
    let days = repo.forecast(auth.user_id(), context, month, today).await?;
    let today_summary = repo.today(auth.user_id(), context, today).await?;

    Ok(Json(json!({
        "context": context,
        "days": days,
        "today": today_summary,
    })))
}

fn parse_month(month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

/// Refreshes the ledger part and balance of every cached context of a user.
///
/// Contexts that were never loaded are left alone; failures are logged and
/// the stale snapshot stays until the next reload.
pub(crate) async fn refresh_after_ledger_change(state: &AppState, user_id: UserId) {
    let today = state.today();
    for context in CONTEXTS {
        if state.cache.cached(user_id, context).await.is_none() {
            continue;
        }
        if let Err(e) = state.cache.reload_ledger(user_id, context, None, today).await {
            warn!(error = %e, user_id = %user_id, context = %context, "Ledger cache reload failed");
            continue;
        }
        if let Err(e) = state.cache.update_real_cash(user_id, context, today).await {
            warn!(error = %e, user_id = %user_id, context = %context, "Real cash update failed");
        }
    }
}
