//! Business logic services for the application layer.

pub mod activity;
pub mod auth_service;
pub mod quote_service;

pub use activity::{ActivityCounters, ActivitySnapshot};
pub use auth_service::AuthService;
pub use quote_service::QuoteService;
