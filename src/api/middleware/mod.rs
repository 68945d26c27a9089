//! HTTP middleware for request processing and protection.
//!
//! Provides the admin gate, rate limiting, and observability middleware.

pub mod auth;
pub mod http_metrics;
pub mod rate_limit;
pub mod tracing;
