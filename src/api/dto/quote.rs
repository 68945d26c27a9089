//! DTOs for quote endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Quote;

/// Request to submit a new quote.
///
/// Missing fields deserialize as empty strings so that they are reported as
/// validation errors rather than JSON errors. Length limits apply to the
/// trimmed values and are enforced by the service.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuoteRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Quote text is required"))]
    pub text: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
}

/// JSON representation of a stored quote.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            text: quote.text,
            author: quote.author,
            views: quote.views,
            created_at: quote.created_at,
        }
    }
}
