//! Mapping repository implementations.
//!
//! # Repositories
//!
//! - [`InMemoryMappingRepository`] - process-local storage, the default backend
//! - [`PgMappingRepository`] - PostgreSQL storage with unique constraints
//!
//! [`pg_pool`] builds the connection pool and runs the embedded migrations.

pub mod memory_mapping_repository;
pub mod pg_mapping_repository;
pub mod pg_pool;

pub use memory_mapping_repository::InMemoryMappingRepository;
pub use pg_mapping_repository::PgMappingRepository;
