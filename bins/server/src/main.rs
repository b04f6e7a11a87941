//! Caixa API Server
//!
//! Main entry point for the Caixa backend service.

use std::sync::Arc;

use anyhow::Context;
use chrono_tz::Tz;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caixa_api::{AppState, create_router};
use caixa_db::{FinancialCache, connect};
use caixa_shared::{AppConfig, JwtService, JwtSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caixa=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let timezone: Tz = config
        .locale
        .timezone
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid timezone {}: {e}", config.locale.timezone))?;

    let db = connect(&config.database).await?;
    info!("Connected to database");

    let jwt_service = JwtService::new(JwtSettings {
        secret: config.jwt.secret.clone(),
        access_token_expires_secs: i64::try_from(config.jwt.access_token_expiry_secs)
            .context("Access token expiry is too large")?,
    });

    let cache = FinancialCache::new(db.clone(), &config.cache);
    info!(
        max_capacity = config.cache.max_capacity,
        ttl_secs = ?config.cache.ttl_secs,
        missing_product = ?config.stock.missing_product,
        timezone = %timezone,
        "Financial cache configured"
    );

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        cache,
        missing_product: config.stock.missing_product,
        timezone,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
