//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - JWT authentication middleware
//! - Error rendering for domain and repository errors

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use caixa_db::FinancialCache;
use caixa_shared::{JwtService, MissingProductPolicy};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Per-context financial cache.
    pub cache: FinancialCache,
    /// What stock updates do when a product is missing.
    pub missing_product: MissingProductPolicy,
    /// Timezone that defines "today".
    pub timezone: Tz,
}

impl AppState {
    /// Current calendar date in the configured timezone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
