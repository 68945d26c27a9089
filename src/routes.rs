//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /`           - Service banner
//! - `GET    /quote`      - Random quote
//! - `GET    /quotes`     - All quotes
//! - `POST   /quote`      - Submit a quote (rate limited)
//! - `DELETE /quote/{id}` - Delete a quote (admin gate, rate limited)
//! - `GET    /stats`      - Usage statistics
//! - `GET    /metrics`    - Prometheus metrics
//! - `GET    /health`     - Health check
//!
//! Anything else gets a JSON 404.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Metrics** - Request counters and latency per route template
//! - **CORS** - Any origin
//! - **Rate limiting** - Per-IP token bucket on writes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::not_found_handler;
use crate::api::middleware::{http_metrics, tracing};
use crate::state::AppState;
use axum::http::{Method, header};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with every route and middleware except path
/// normalization.
pub fn router(state: AppState, rate_limited: bool) -> Router {
    Router::new()
        .merge(api::routes::public_routes())
        .merge(api::routes::write_routes(state.clone(), rate_limited))
        .route_layer(middleware::from_fn(http_metrics::layer))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors_layer())
        .layer(tracing::layer())
}

/// Constructs the application router served by the binary.
///
/// Trailing slashes are trimmed before routing, so `/quotes/` reaches
/// `/quotes`. Must be served with connect info for the rate limiter.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, true))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
