//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod cash;
pub mod conditionals;
pub mod cost_centers;
pub mod health;
pub mod ledger;
pub mod products;
pub mod trades;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(cost_centers::routes())
        .merge(ledger::routes())
        .merge(cash::routes())
        .merge(products::routes())
        .merge(trades::routes())
        .merge(conditionals::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
