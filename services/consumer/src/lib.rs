//! Date Consumer - client for the date validation provider.
//!
//! The consumer contract tests in `tests/` record what this client expects
//! from the provider into `pacts/Consumer-Provider.json`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{ConsumerApiClient, ProviderResponse, VALIDATE_PATH};
pub use error::{ConsumerError, PROVIDER_UNREACHABLE_MESSAGE};
