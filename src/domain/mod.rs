//! Domain layer containing quote entities and content rules.
//!
//! Defines the entities, the repository contract and the content validator,
//! independent of storage and HTTP concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`content_validator`] - Disallowed-language screening for submissions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod content_validator;
pub mod entities;
pub mod repositories;
