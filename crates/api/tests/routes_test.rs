//! End-to-end route tests against an in-memory database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use caixa_api::{AppState, create_router};
use caixa_db::FinancialCache;
use caixa_db::migration::{Migrator, MigratorTrait};
use caixa_shared::config::CacheConfig;
use caixa_shared::{JwtService, JwtSettings, MissingProductPolicy};

struct TestApp {
    router: Router,
    token: String,
}

async fn app() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    let jwt_service = JwtService::new(JwtSettings {
        secret: "route-test-secret".to_string(),
        access_token_expires_secs: 900,
    });
    let token = jwt_service
        .generate_access_token(Uuid::new_v4())
        .expect("issue token");

    let state = AppState {
        cache: FinancialCache::new(db.clone(), &CacheConfig::default()),
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        missing_product: MissingProductPolicy::Lenient,
        timezone: chrono_tz::America::Sao_Paulo,
    };

    TestApp {
        router: create_router(state),
        token,
    }
}

impl TestApp {
    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app().await;
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let app = app().await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/api/v1/ledger/entries")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "missing_token");
}

#[tokio::test]
async fn test_create_list_and_pay_entries() {
    let app = app().await;

    let (status, center) = app
        .send(
            "POST",
            "/api/v1/cost-centers",
            Some(json!({"name": "aluguel", "context": "loja", "kind": "DESPESA"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let center_id = center["id"].as_str().unwrap().to_string();

    let (status, created) = app
        .send(
            "POST",
            "/api/v1/ledger/entries",
            Some(json!({
                "description": "aluguel loja",
                "value": "300",
                "kind": "saida",
                "date": "2024-03-10",
                "cost_center_id": center_id,
                "plan": {"mode": "installments", "count": 3, "cadence": "mensal"}
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.as_array().unwrap().len(), 3);

    let (status, listed) = app
        .send("GET", "/api/v1/ledger/entries?status=previsto", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 3);

    let first = created[0]["id"].as_str().unwrap();
    let (status, paid) = app
        .send(
            "POST",
            &format!("/api/v1/ledger/entries/{first}/payment"),
            Some(json!({"accept_full": true})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "processed");
    assert!(paid["remainder_entry"].is_null());

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/v1/ledger/entries/{first}/payment"),
            Some(json!({"accept_full": true})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "ALREADY_REALIZED");

    let second = created[1]["id"].as_str().unwrap();
    let (status, body) = app
        .send(
            "POST",
            &format!("/api/v1/ledger/entries/{second}/payment"),
            Some(json!({"accept_full": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");
}

#[tokio::test]
async fn test_unknown_entry_is_not_found() {
    let app = app().await;
    let (status, body) = app
        .send(
            "DELETE",
            &format!("/api/v1/ledger/entries/{}", Uuid::new_v4()),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_forecast_rejects_bad_month() {
    let app = app().await;
    let (status, _) = app
        .send("GET", "/api/v1/cash/casa/forecast?month=2024-13", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send("GET", "/api/v1/cash/casa/forecast?month=2024-02", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["days"].as_array().unwrap().is_empty());
    assert_eq!(body["context"], "casa");
}

#[tokio::test]
async fn test_sale_moves_stock() {
    let app = app().await;

    let (status, product) = app
        .send(
            "POST",
            "/api/v1/products",
            Some(json!({
                "description": "camisa",
                "category": "roupas",
                "quantity": 5,
                "cost_price": "10",
                "sale_price": "25"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = product["id"].as_str().unwrap().to_string();

    let (status, sale) = app
        .send(
            "POST",
            "/api/v1/sales",
            Some(json!({
                "counterparty": "maria",
                "date": "2024-03-10",
                "lines": [{
                    "mode": "existing",
                    "product_id": product_id,
                    "description": "camisa",
                    "quantity": 2,
                    "sale_price": "25"
                }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{sale}");

    let (_, fetched) = app
        .send("GET", &format!("/api/v1/products/{product_id}"), None)
        .await;
    assert_eq!(fetched["quantidade"], 3);

    let sale_id = sale["id"].as_str().unwrap();
    let (status, _) = app
        .send("DELETE", &format!("/api/v1/sales/{sale_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, fetched) = app
        .send("GET", &format!("/api/v1/products/{product_id}"), None)
        .await;
    assert_eq!(fetched["quantidade"], 5);
}
