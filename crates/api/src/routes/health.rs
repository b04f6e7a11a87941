//! Liveness probe.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Probe body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: &'static str,
    /// Whether the database answered a ping.
    pub database: bool,
    /// Crate version.
    pub version: &'static str,
}

/// GET `/health` - Reports the service version and database reachability.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Database ping failed");
            false
        }
    };
    let (code, status) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Public routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
