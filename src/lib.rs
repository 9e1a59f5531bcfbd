//! Backend de seguimiento de challans (multas de tráfico)
//!
//! API REST sobre un registro de vehículos y un almacén de challans, con
//! consulta por matrícula protegida por propiedad del vehículo.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{extract::State, middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{cors_layer, rate_limit_middleware, RateLimitState};
use crate::state::AppState;

/// Construir la aplicación completa con sus capas
pub fn create_app(state: AppState) -> Router {
    let rate_limit = RateLimitState::new(&state.config);
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes::create_api_router())
        .layer(from_fn_with_state(rate_limit, rate_limit_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "store": state.store_kind,
        "searchCache": {
            "entries": state.search_cache.active_entries().await,
            "ttlSecs": state.search_cache.ttl().as_secs(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
