//! Domain layer containing the storage contract of the shortening engine.
//!
//! A mapping is the persisted pair `(code, original_url)`. Both columns are
//! unique, a mapping is created once per distinct normalized URL and is
//! never updated or deleted.
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod metrics;
pub mod repositories;
