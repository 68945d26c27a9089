//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without storage concerns. Creation input
//! is modelled separately from the stored record:
//!
//! - [`Quote`] - A stored quote with its view counter
//! - [`NewQuote`] - Validated input for inserting a quote
//! - [`QuoteStats`] - Aggregate counts over all stored quotes

pub mod quote;

pub use quote::{MAX_AUTHOR_CHARS, MAX_TEXT_CHARS, NewQuote, Quote, QuoteStats};
