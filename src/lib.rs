//! # Quote Service
//!
//! Serves inspirational quotes over HTTP, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Quote entities, repository trait, content validator
//! - **Application Layer** ([`application`]) - Quote service, admin gate, activity counters
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence and seed data
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random quote with an atomic view counter
//! - Submissions screened for disallowed language before storage
//! - Optional admin token for deletions
//! - Prometheus metrics, rate limiting and structured logs
//!
//! ## Quick Start
//!
//! ```bash
//! export DB_PATH="data/quotes.db"   # Optional
//! export ADMIN_TOKEN_HASH="<sha256 hex>"  # Optional, see `quotes-admin token create`
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, QuoteService};
    pub use crate::domain::content_validator::{ContentValidator, Verdict};
    pub use crate::domain::entities::{NewQuote, Quote, QuoteStats};
    pub use crate::domain::repositories::QuoteRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{SqliteQuoteRepository, StoreConfig};
    pub use crate::state::AppState;
}
