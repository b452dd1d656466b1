//! Business logic services for the application layer.

pub mod shortener_service;

pub use shortener_service::{DEFAULT_MAX_ATTEMPTS, DynShortenerService, ShortenerService};
