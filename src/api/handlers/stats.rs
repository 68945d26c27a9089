//! Handler for usage statistics.

use axum::{Json, extract::State};

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns store totals and the activity counters of this process.
///
/// # Endpoint
///
/// `GET /stats`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "totalQuotes": 5,
///     "totalViews": 17,
///     "totalRandomQuoteRequests": 17,
///     "quotesAdded": 0,
///     "profanityBlocked": 2
///   }
/// }
/// ```
pub async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StatsResponse>>, AppError> {
    let stats = state.quote_service.statistics().await?;
    let activity = state.quote_service.activity();

    Ok(Json(ApiResponse::ok(StatsResponse::new(stats, activity))))
}
