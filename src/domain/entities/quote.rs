//! Quote entity, the only persisted record of the service.

use chrono::{DateTime, Utc};

/// Maximum length of a quote body, in characters.
pub const MAX_TEXT_CHARS: usize = 1000;

/// Maximum length of an author name, in characters.
pub const MAX_AUTHOR_CHARS: usize = 100;

/// A stored quote with its view counter.
///
/// Everything except `views` is immutable once the row exists. `views` only
/// grows, by exactly one each time the quote is picked by a random fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Creates a new Quote instance.
    pub fn new(
        id: i64,
        text: String,
        author: String,
        views: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text,
            author,
            views,
            created_at,
        }
    }
}

/// Input data for inserting a quote.
///
/// Carries content that has already passed validation; the store does not
/// re-check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub text: String,
    pub author: String,
}

impl NewQuote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

/// Aggregate numbers computed from the current contents of the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteStats {
    pub total_quotes: i64,
    pub total_views: i64,
}
