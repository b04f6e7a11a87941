//! Product and stock routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use caixa_core::stock::MovementKind;
use caixa_db::repositories::{
    CreateProductInput, ManualMovementInput, ProductRepository, StockRepository,
};
use caixa_shared::types::ProductId;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the product routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/search", get(search_products))
        .route("/products/last-cost", get(last_cost))
        .route("/products/{id}", get(get_product))
        .route("/products/{id}/movements", get(list_product_movements))
        .route("/stock/movements", get(recent_movements).post(record_movement))
}

/// Request body for registering a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Description.
    pub description: String,
    /// Category.
    #[serde(default)]
    pub category: String,
    /// Starting quantity.
    #[serde(default)]
    pub quantity: i32,
    /// Unit cost.
    #[serde(default)]
    pub cost_price: Decimal,
    /// Sale price.
    #[serde(default)]
    pub sale_price: Decimal,
    /// Last purchase date. Defaults to today.
    pub date: Option<NaiveDate>,
}

/// Request body for a manual stock movement.
#[derive(Debug, Deserialize)]
pub struct MovementRequest {
    /// Product.
    pub product_id: ProductId,
    /// `entrada`, `saida` or `ajuste`.
    pub kind: MovementKind,
    /// Quantity moved, or the new quantity for `ajuste`.
    pub quantity: i32,
    /// Note.
    #[serde(default)]
    pub note: String,
}

/// Query for product search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search term.
    #[serde(default)]
    pub q: String,
}

/// Query for the last cost lookup.
#[derive(Debug, Deserialize)]
pub struct LastCostQuery {
    /// Item description.
    pub description: String,
}

/// GET `/products` - List products.
async fn list_products(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = ProductRepository::new((*state.db).clone());
    Ok(Json(repo.list().await?))
}

/// POST `/products` - Register a product outside a purchase.
async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> ApiResult<impl IntoResponse> {
    if body.description.trim().is_empty() {
        return Err(ApiError::bad_request("Descrição é obrigatória"));
    }

    let repo = ProductRepository::new((*state.db).clone());
    let product = repo
        .create(CreateProductInput {
            description: body.description,
            category: body.category,
            quantity: body.quantity,
            cost_price: body.cost_price,
            sale_price: body.sale_price,
            date: body.date.unwrap_or_else(|| state.today()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET `/products/{id}` - Get a product.
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<impl IntoResponse> {
    let repo = ProductRepository::new((*state.db).clone());
    let product = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Produto não encontrado: {id}")))?;
    Ok(Json(product))
}

/// GET `/products/search?q=` - Search by description or code.
async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let repo = ProductRepository::new((*state.db).clone());
    Ok(Json(repo.search(&query.q).await?))
}

/// GET `/products/last-cost?description=` - Cost of the latest purchase line.
async fn last_cost(
    State(state): State<AppState>,
    Query(query): Query<LastCostQuery>,
) -> impl IntoResponse {
    let repo = ProductRepository::new((*state.db).clone());
    let cost_price = repo.last_cost_price(&query.description).await;
    Json(json!({ "description": query.description, "cost_price": cost_price }))
}

/// GET `/products/{id}/movements` - Movement log of a product.
async fn list_product_movements(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<impl IntoResponse> {
    let repo = StockRepository::new((*state.db).clone());
    Ok(Json(repo.movements_for(id).await?))
}

/// GET `/stock/movements` - Most recent movements.
async fn recent_movements(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let repo = StockRepository::new((*state.db).clone());
    Ok(Json(repo.recent_movements().await?))
}

/// POST `/stock/movements` - Record a manual movement.
async fn record_movement(
    State(state): State<AppState>,
    Json(body): Json<MovementRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = StockRepository::new((*state.db).clone());
    let quantity = repo
        .record_manual(ManualMovementInput {
            product_id: body.product_id,
            kind: body.kind,
            quantity: body.quantity,
            note: body.note,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "product_id": body.product_id, "quantity": quantity })),
    ))
}
