//! Utility functions for code generation, URL processing, and request handling.
//!
//! This module provides helper functions used across the application:
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - URL validation and normalization
//! - [`short_url`] - Public short URL construction
//! - [`db_error`] - PostgreSQL constraint violation classification

pub mod code_generator;
pub mod db_error;
pub mod short_url;
pub mod url_validator;
