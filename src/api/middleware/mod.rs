//! HTTP middleware for request processing.
//!
//! Provides request timeouts, request IDs and observability middleware.

pub mod request_id;
pub mod timeout;
pub mod tracing;
