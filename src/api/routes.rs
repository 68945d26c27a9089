//! API route configuration.
//!
//! Reads are public. Writes are rate limited per client IP and deletion is
//! additionally guarded by the admin gate ([`crate::api::middleware::auth`]).

use crate::api::handlers::{
    delete_quote_handler, health_handler, index_handler, list_quotes_handler, metrics_handler,
    random_quote_handler, stats_handler, submit_quote_handler,
};
use crate::api::middleware::{auth, rate_limit};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// Read-only endpoints.
///
/// # Endpoints
///
/// - `GET /`        - Service banner and endpoint list
/// - `GET /quote`   - Random quote (counts a view)
/// - `GET /quotes`  - All quotes, newest first
/// - `GET /stats`   - Totals and activity counters
/// - `GET /metrics` - Prometheus exposition
/// - `GET /health`  - Database check
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/quote", get(random_quote_handler))
        .route("/quotes", get(list_quotes_handler))
        .route("/stats", get(stats_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
}

/// Endpoints that change stored quotes.
///
/// # Endpoints
///
/// - `POST   /quote`      - Submit a quote
/// - `DELETE /quote/{id}` - Delete a quote (admin gate)
///
/// `rate_limited` is false only for in-process tests, where no peer address
/// is available to key the limiter on.
pub fn write_routes(state: AppState, rate_limited: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/quote", post(submit_quote_handler))
        .route(
            "/quote/{id}",
            delete(delete_quote_handler)
                .route_layer(middleware::from_fn_with_state(state, auth::layer)),
        );

    if rate_limited {
        router.layer(rate_limit::write_layer())
    } else {
        router
    }
}
