//! Dealer sales, online orders, payments and expenses behind a small JSON API.

pub mod auth;
pub mod billing;
pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod reports;
pub mod routes;
pub mod search;
pub mod state;
pub mod store;

use axum::http::HeaderValue;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// The complete application with state, CORS and request tracing applied.
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    routes::create_router(&state)
        .route("/", get(|| async { "DealerDesk API" }))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        None => layer.allow_origin(Any),
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS_ORIGIN; cross-origin requests are disabled");
                layer
            }
        },
    }
}

async fn health_check() -> &'static str {
    "OK"
}
