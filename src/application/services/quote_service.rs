//! Quote submission, serving and administration service.

use std::sync::Arc;

use crate::application::services::activity::{ActivityCounters, ActivitySnapshot};
use crate::domain::content_validator::{ContentValidator, Verdict};
use crate::domain::entities::{MAX_AUTHOR_CHARS, MAX_TEXT_CHARS, NewQuote, Quote, QuoteStats};
use crate::domain::repositories::QuoteRepository;
use crate::error::AppError;
use serde_json::json;

/// Entry point of the quote core for the HTTP layer and the admin CLI.
///
/// Every write goes through [`QuoteService::submit_quote`], which validates the
/// content before the repository sees it. Reads are passed through unchanged.
pub struct QuoteService<R: QuoteRepository> {
    repository: Arc<R>,
    validator: ContentValidator,
    activity: ActivityCounters,
}

impl<R: QuoteRepository> QuoteService<R> {
    /// Creates a new quote service.
    pub fn new(repository: Arc<R>, validator: ContentValidator) -> Self {
        Self {
            repository,
            validator,
            activity: ActivityCounters::new(),
        }
    }

    /// Validates and stores a new quote.
    ///
    /// Both fields are trimmed first. Shape rules (non-empty, at most
    /// 1000 / 100 characters) are checked before the content screen.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is empty or too long.
    /// Returns [`AppError::ContentRejected`] if the validator refuses the text
    /// or the author; nothing is written in that case.
    /// Returns storage errors from the repository unchanged.
    pub async fn submit_quote(&self, text: &str, author: &str) -> Result<Quote, AppError> {
        let text = text.trim();
        let author = author.trim();

        check_field("text", text, MAX_TEXT_CHARS)?;
        check_field("author", author, MAX_AUTHOR_CHARS)?;

        if let Verdict::Rejected(reason) = self.validator.validate_submission(text, author) {
            self.activity.record_rejected(reason.field());
            tracing::warn!(field = reason.field(), "Quote submission rejected");
            return Err(AppError::content_rejected(reason.message()));
        }

        let quote = self
            .repository
            .add_quote(NewQuote::new(text, author))
            .await?;

        self.activity.record_added();
        tracing::info!(id = quote.id, author = %quote.author, "Quote added");

        Ok(quote)
    }

    /// Returns a random quote after counting one view for it.
    ///
    /// `Ok(None)` means the store is empty.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repository unchanged.
    pub async fn serve_random_quote(&self) -> Result<Option<Quote>, AppError> {
        let quote = self.repository.random_quote().await?;
        self.activity.record_random_request(quote.is_some());
        Ok(quote)
    }

    /// Deletes a quote by id. Returns `false` if it did not exist.
    ///
    /// Callers are expected to have checked authorization.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repository unchanged.
    pub async fn remove_quote(&self, id: i64) -> Result<bool, AppError> {
        let removed = self.repository.delete_quote(id).await?;
        if removed {
            tracing::info!(id, "Quote deleted");
        }
        Ok(removed)
    }

    /// Lists all quotes, newest first.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repository unchanged.
    pub async fn list_quotes(&self) -> Result<Vec<Quote>, AppError> {
        self.repository.list_quotes().await
    }

    /// Aggregate count of quotes and views.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repository unchanged.
    pub async fn statistics(&self) -> Result<QuoteStats, AppError> {
        self.repository.stats().await
    }

    /// Counters of requests handled by this process.
    pub fn activity(&self) -> ActivitySnapshot {
        self.activity.snapshot()
    }

    /// The validator used for submissions.
    ///
    /// The admin CLI masks rejected input with it before echoing it back.
    pub fn validator(&self) -> &ContentValidator {
        &self.validator
    }

    /// Confirms the backing store answers queries.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the store is unreachable or closed.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Releases the backing store; later calls fail with `StorageClosed`.
    pub async fn shutdown(&self) {
        self.repository.shutdown().await;
    }
}

fn check_field(field: &'static str, value: &str, max_chars: usize) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::bad_request(
            format!("{field} must not be empty"),
            json!({ "field": field }),
        ));
    }

    let length = value.chars().count();
    if length > max_chars {
        return Err(AppError::bad_request(
            format!("{field} must be at most {max_chars} characters"),
            json!({ "field": field, "provided_length": length, "max_length": max_chars }),
        ));
    }

    Ok(())
}
