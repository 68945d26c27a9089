//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit testing services.
//!
//! # Available Repositories
//!
//! - [`QuoteRepository`] - Quote storage, random serving and aggregates
//!
//! # Testing
//!
//! See integration tests in `tests/repository_quote.rs` for usage examples.

pub mod quote_repository;

pub use quote_repository::QuoteRepository;

#[cfg(test)]
pub use quote_repository::MockQuoteRepository;
