//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::quote_service::QuoteService`] - Validated submission, random serving, administration
//! - [`services::auth_service::AuthService`] - Admin token gate
//! - [`services::activity::ActivityCounters`] - In-process request counters

pub mod services;
