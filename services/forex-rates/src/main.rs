//! Mebel Forex Rates Service
//!
//! Serves currency rates for the price display, cached per base currency.

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use mebel_models::{CurrencyRate, ForexCacheEntry};
use mebel_utils::{init_logging, validate_currency_code, AppConfig, ErrorResponse, MebelError};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod cache;
mod rate_client;

use cache::{CacheState, ForexRateCache, SystemClock};
use rate_client::HttpRateSource;

type RatesCache = Arc<ForexRateCache<HttpRateSource, SystemClock>>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|_| {
        eprintln!("Failed to load configuration, using defaults");
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    info!("Starting Mebel Forex Rates Service");

    let forex = &config.forex;
    let source = HttpRateSource::new(
        forex.api_url.clone(),
        Duration::from_secs(forex.request_timeout_seconds),
    )
    .context("Failed to create rate client")?;
    let cache: RatesCache = Arc::new(ForexRateCache::new(
        source,
        SystemClock,
        Duration::from_secs(forex.ttl_seconds),
        forex.tracked_currencies.clone(),
    ));

    if let Some(path) = &forex.snapshot_path {
        restore_snapshot(&cache, path).await;
    }

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/rates/:base", get(get_rates))
        .route("/api/v1/rates/:base/refresh", post(refresh_rates))
        .layer(TraceLayer::new_for_http())
        .with_state(cache.clone());

    let addr: SocketAddr = format!("{}:{}", forex.host, forex.port)
        .parse()
        .context("Invalid forex listen address")?;
    let listener = TcpListener::bind(&addr).await?;
    info!("Forex Rates Service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(path) = &forex.snapshot_path {
        save_snapshot(&cache, path).await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

/// A missing or unreadable snapshot only means starting with an empty cache.
async fn restore_snapshot(cache: &RatesCache, path: &str) {
    let entries = match tokio::fs::read(path).await {
        Ok(data) => serde_json::from_slice::<Vec<ForexCacheEntry>>(&data),
        Err(e) => {
            info!(path, error = %e, "No rate snapshot to restore");
            return;
        }
    };

    match entries {
        Ok(entries) => {
            info!(path, bases = entries.len(), "Restoring rate snapshot");
            cache.restore(entries).await;
        }
        Err(e) => warn!(path, error = %e, "Ignoring unreadable rate snapshot"),
    }
}

async fn save_snapshot(cache: &RatesCache, path: &str) -> Result<()> {
    let entries = cache.snapshot().await;
    let data = serde_json::to_vec_pretty(&entries)?;
    tokio::fs::write(path, data)
        .await
        .with_context(|| format!("Failed to write rate snapshot to {}", path))?;
    info!(path, bases = entries.len(), "Rate snapshot saved");
    Ok(())
}

async fn health_check(State(cache): State<RatesCache>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "forex-rates",
        "version": env!("CARGO_PKG_VERSION"),
        "tracked_currencies": cache.tracked(),
        "cached_bases": cache.snapshot().await.len()
    }))
}

#[derive(Debug, Serialize)]
struct RatesResponse {
    base: String,
    state: CacheState,
    rates: Vec<CurrencyRate>,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

async fn get_rates(State(cache): State<RatesCache>, Path(base): Path<String>) -> ApiResult<RatesResponse> {
    let base = validate_currency_code(&base).map_err(error_response)?;
    let rates = cache
        .fetch(&base)
        .await
        .map_err(|e| error_response(MebelError::rates_unavailable(base.clone(), e.to_string())))?;

    Ok(Json(RatesResponse {
        state: cache.state(&base).await,
        base,
        rates,
    }))
}

async fn refresh_rates(State(cache): State<RatesCache>, Path(base): Path<String>) -> ApiResult<RatesResponse> {
    let base = validate_currency_code(&base).map_err(error_response)?;
    info!(base = %base, "Manual rate refresh");
    let rates = cache
        .refresh(&base)
        .await
        .map_err(|e| error_response(MebelError::rates_unavailable(base.clone(), e.to_string())))?;

    Ok(Json(RatesResponse {
        state: cache.state(&base).await,
        base,
        rates,
    }))
}

fn error_response(error: MebelError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(error)))
}
