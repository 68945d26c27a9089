//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. The schema
//! lives in `migrations/` and is embedded at compile time.
//!
//! # Repositories
//!
//! - [`SqliteQuoteRepository`] - Quote storage, random serving and aggregates

pub mod seed;
pub mod sqlite_quote_repository;

pub use sqlite_quote_repository::{SqliteQuoteRepository, StoreConfig};
