//! DTOs for the statistics endpoint.

use serde::Serialize;

use crate::application::services::ActivitySnapshot;
use crate::domain::entities::QuoteStats;

/// Store totals plus the counters of this process.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_quotes: i64,
    pub total_views: i64,
    pub total_random_quote_requests: u64,
    pub quotes_added: u64,
    pub profanity_blocked: u64,
}

impl StatsResponse {
    pub fn new(stats: QuoteStats, activity: ActivitySnapshot) -> Self {
        Self {
            total_quotes: stats.total_quotes,
            total_views: stats.total_views,
            total_random_quote_requests: activity.random_quote_requests,
            quotes_added: activity.quotes_added,
            profanity_blocked: activity.submissions_rejected,
        }
    }
}
