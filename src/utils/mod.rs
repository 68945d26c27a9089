//! Helper functions shared across layers.
//!
//! - [`db_error`] - Mapping of `sqlx` errors onto storage errors

pub mod db_error;
