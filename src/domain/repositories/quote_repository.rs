//! Repository trait for quote data access.

use crate::domain::entities::{NewQuote, Quote, QuoteStats};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for stored quotes.
///
/// Implementations own the backing connection. Callers only ever receive owned
/// copies of rows; the single mutation of an existing row (the view counter)
/// happens inside [`QuoteRepository::random_quote`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteQuoteRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_quote.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Inserts a quote with `views = 0` and the current timestamp.
    ///
    /// No content validation happens here; see
    /// [`crate::application::services::QuoteService::submit_quote`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageWrite`] if the insert fails.
    /// Returns [`AppError::StorageClosed`] after [`Self::shutdown`].
    async fn add_quote(&self, new_quote: NewQuote) -> Result<Quote, AppError>;

    /// Picks one quote uniformly at random and increments its view counter.
    ///
    /// Selection and increment are a single atomic statement, so concurrent
    /// calls landing on the same row each add exactly one view.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Quote))` with the post-increment `views`
    /// - `Ok(None)` if the store is empty
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageWrite`] if the statement fails.
    /// Returns [`AppError::StorageClosed`] after [`Self::shutdown`].
    async fn random_quote(&self) -> Result<Option<Quote>, AppError>;

    /// Lists every quote, newest first (ties broken by id, descending).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageRead`] on database errors.
    async fn list_quotes(&self) -> Result<Vec<Quote>, AppError>;

    /// Permanently deletes a quote.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if no quote had
    /// that id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageWrite`] on database errors.
    async fn delete_quote(&self, id: i64) -> Result<bool, AppError>;

    /// Counts quotes and sums their views.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageRead`] on database errors.
    async fn stats(&self) -> Result<QuoteStats, AppError>;

    /// Runs a trivial query to confirm the backing store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageRead`] or [`AppError::StorageClosed`].
    async fn ping(&self) -> Result<(), AppError>;

    /// Releases the backing connection.
    ///
    /// Every later call on the repository fails with [`AppError::StorageClosed`].
    async fn shutdown(&self);
}
