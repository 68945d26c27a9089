//! In-process activity counters shown next to the store statistics.
//!
//! These count requests handled by this process since start. They are separate
//! from the per-quote `views` column and reset on restart.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metric names emitted through the `metrics` facade.
pub const QUOTES_SERVED_TOTAL: &str = "quotes_served_total";
pub const QUOTES_ADDED_TOTAL: &str = "quotes_added_total";
pub const SUBMISSIONS_REJECTED_TOTAL: &str = "quote_submissions_rejected_total";

#[derive(Debug, Default)]
pub struct ActivityCounters {
    random_quote_requests: AtomicU64,
    quotes_added: AtomicU64,
    submissions_rejected: AtomicU64,
}

/// Point-in-time copy of [`ActivityCounters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivitySnapshot {
    pub random_quote_requests: u64,
    pub quotes_added: u64,
    pub submissions_rejected: u64,
}

impl ActivityCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_random_request(&self, served: bool) {
        self.random_quote_requests.fetch_add(1, Ordering::Relaxed);
        if served {
            metrics::counter!(QUOTES_SERVED_TOTAL).increment(1);
        }
    }

    pub fn record_added(&self) {
        self.quotes_added.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(QUOTES_ADDED_TOTAL).increment(1);
    }

    pub fn record_rejected(&self, field: &'static str) {
        self.submissions_rejected.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(SUBMISSIONS_REJECTED_TOTAL, "field" => field).increment(1);
    }

    pub fn snapshot(&self) -> ActivitySnapshot {
        ActivitySnapshot {
            random_quote_requests: self.random_quote_requests.load(Ordering::Relaxed),
            quotes_added: self.quotes_added.load(Ordering::Relaxed),
            submissions_rejected: self.submissions_rejected.load(Ordering::Relaxed),
        }
    }
}
