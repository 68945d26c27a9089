//! Handlers for quote endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::envelope::{Ack, ApiResponse};
use crate::api::dto::quote::{QuoteResponse, SubmitQuoteRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Serves a random quote and counts the view.
///
/// # Endpoint
///
/// `GET /quote`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 3,
///     "text": "Life is what happens when you're busy making other plans.",
///     "author": "John Lennon",
///     "views": 12,
///     "created_at": "2024-01-01T00:00:00Z"
///   }
/// }
/// ```
///
/// `data` is `null` when there are no quotes.
pub async fn random_quote_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<QuoteResponse>>>, AppError> {
    let quote = state.quote_service.serve_random_quote().await?;
    Ok(Json(ApiResponse::ok(quote.map(QuoteResponse::from))))
}

/// Lists all quotes, newest first.
///
/// # Endpoint
///
/// `GET /quotes`
pub async fn list_quotes_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<QuoteResponse>>>, AppError> {
    let quotes = state.quote_service.list_quotes().await?;
    Ok(Json(ApiResponse::ok(
        quotes.into_iter().map(QuoteResponse::from).collect(),
    )))
}

/// Submits a new quote.
///
/// # Endpoint
///
/// `POST /quote`
///
/// # Request Body
///
/// ```json
/// { "text": "Stay curious.", "author": "Ada Lovelace" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if:
/// - the body is not valid JSON
/// - a field is missing, empty or too long
/// - the text or the author contains disallowed language
pub async fn submit_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<SubmitQuoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<QuoteResponse>>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Request body must be a JSON object with text and author",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;

    let quote = state
        .quote_service
        .submit_quote(&payload.text, &payload.author)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(quote.into()))))
}

/// Deletes a quote by id.
///
/// # Endpoint
///
/// `DELETE /quote/{id}`
///
/// Guarded by the admin gate (see [`crate::api::middleware::auth`]).
///
/// # Errors
///
/// - 400 if `id` is not an integer
/// - 404 if no quote has this id
pub async fn delete_quote_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Ack>, AppError> {
    let Path(id) = id.map_err(|rejection| {
        AppError::bad_request(
            "Quote id must be an integer",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    if state.quote_service.remove_quote(id).await? {
        Ok(Json(Ack::new("Quote deleted successfully")))
    } else {
        Err(AppError::not_found("Quote not found", json!({ "id": id })))
    }
}
