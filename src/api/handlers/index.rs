//! Service banner and catch-all 404.

use axum::{
    Json,
    http::{Method, StatusCode, Uri},
};

use crate::api::dto::index::{EndpointInfo, IndexResponse};
use crate::error::ErrorBody;

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/quote", "Get a random quote"),
    ("GET", "/quotes", "List all quotes"),
    ("POST", "/quote", "Submit a new quote"),
    ("DELETE", "/quote/{id}", "Delete a quote (admin)"),
    ("GET", "/stats", "Usage statistics"),
    ("GET", "/metrics", "Prometheus metrics"),
    ("GET", "/health", "Health check"),
];

/// `GET /`
pub async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        success: true,
        message: "Quote service is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path, description)| EndpointInfo {
                method,
                path,
                description,
            })
            .collect(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found_handler(method: Method, uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            success: false,
            error: "Not Found",
            message: format!("Route {method} {} not found", uri.path()),
            details: serde_json::Value::Null,
        }),
    )
}
