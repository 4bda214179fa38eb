//! Shared library for cross-cutting concerns in the date-validation services.
//!
//! This crate provides centralized implementations for:
//! - A common error type for HTTP, serialization and filesystem failures
//! - HTTP client configuration and building
//! - Tracing subscriber initialization

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod tracing_config;

pub use error::PlatformError;
pub use http::{HttpConfig, build_http_client};
pub use tracing_config::{TracingConfig, init_tracing};
