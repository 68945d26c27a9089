//! Prometheus exposition endpoint.

use axum::{extract::State, http::header, response::IntoResponse};

use crate::state::AppState;

const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// `GET /metrics`
///
/// Renders every metric recorded through the `metrics` facade. Empty when no
/// recorder is installed.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    ([(header::CONTENT_TYPE, CONTENT_TYPE)], body)
}
