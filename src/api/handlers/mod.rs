//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod index;
pub mod metrics;
pub mod quotes;
pub mod stats;

pub use health::health_handler;
pub use index::{index_handler, not_found_handler};
pub use metrics::metrics_handler;
pub use quotes::{
    delete_quote_handler, list_quotes_handler, random_quote_handler, submit_quote_handler,
};
pub use stats::stats_handler;
