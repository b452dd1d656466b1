//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete storage backends for URL mappings and the metrics exporter.
//!
//! # Modules
//!
//! - [`metrics`] - Prometheus export of engine counters
//! - [`persistence`] - In-memory and PostgreSQL repository implementations

pub mod metrics;
pub mod persistence;
