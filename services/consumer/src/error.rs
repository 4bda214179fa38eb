//! Consumer errors.

use thiserror::Error;

/// Message shown when the provider cannot be reached.
pub const PROVIDER_UNREACHABLE_MESSAGE: &str = "There was a problem connecting to Provider API.";

/// Errors raised by [`crate::ConsumerApiClient`].
#[derive(Error, Debug)]
pub enum ConsumerError {
    /// Provider base URI could not be used
    #[error("Invalid provider URI {uri}: {reason}")]
    InvalidBaseUri {
        /// The offending URI
        uri: String,
        /// Parser message
        reason: String,
    },

    /// Connection or transfer failure; HTTP error statuses are not errors
    #[error("There was a problem connecting to Provider API.")]
    ProviderUnreachable(#[source] reqwest::Error),

    /// HTTP client construction failed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ConsumerError {
    pub(crate) fn invalid_base_uri(uri: &str, reason: impl ToString) -> Self {
        Self::InvalidBaseUri {
            uri: uri.to_string(),
            reason: reason.to_string(),
        }
    }
}
