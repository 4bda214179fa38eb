//! Error handling for the provider HTTP surface.
//!
//! Every failure a request can hit is a `ProviderError` variant with an
//! `ErrorCode`. Validation failures render the consumer-facing `message`
//! body; control-plane failures render a diagnostic body that echoes the
//! raw request so a failed verification can be read without server logs.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Message returned when `validDateTime` is absent or empty.
pub const MISSING_PARAMETER_MESSAGE: &str = "validDateTime is required";

/// Message returned when `validDateTime` cannot be parsed.
pub const INVALID_FORMAT_MESSAGE: &str = "validDateTime is not a date or time";

/// Content type of every JSON body the provider writes.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Provider errors. None of them is fatal to the process.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    /// `validDateTime` absent or empty
    #[error("validDateTime is required")]
    MissingParameter,

    /// Backing data absent, or the forced-404 switch is on
    #[error("no data available")]
    NotFound,

    /// `validDateTime` present but not a date or time
    #[error("validDateTime is not a date or time")]
    InvalidFormat,

    /// Provider-state request named a state nobody registered
    #[error("unknown provider state '{state}'")]
    UnknownProviderState {
        /// The unrecognized state name
        state: String,
        /// Raw request payload
        request: String,
    },

    /// Provider-state request body was not valid JSON for the expected shape
    #[error("malformed provider state body: {reason}")]
    MalformedStateBody {
        /// Deserializer message
        reason: String,
        /// Raw request payload
        request: String,
    },

    /// The data-presence marker could not be changed
    #[error("provider state storage failed: {reason}")]
    Storage {
        /// Underlying I/O message
        reason: String,
        /// Raw request payload
        request: String,
    },
}

/// Error codes for programmatic handling and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// See [`ProviderError::MissingParameter`]
    MissingParameter,
    /// See [`ProviderError::NotFound`]
    NotFound,
    /// See [`ProviderError::InvalidFormat`]
    InvalidFormat,
    /// See [`ProviderError::UnknownProviderState`]
    UnknownProviderState,
    /// See [`ProviderError::MalformedStateBody`]
    MalformedStateBody,
    /// See [`ProviderError::Storage`]
    Storage,
}

impl ErrorCode {
    /// Get the string representation of the error code
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingParameter => "MISSING_PARAMETER",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::UnknownProviderState => "UNKNOWN_PROVIDER_STATE",
            Self::MalformedStateBody => "MALFORMED_STATE_BODY",
            Self::Storage => "STATE_STORAGE_FAILED",
        }
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter | Self::InvalidFormat => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UnknownProviderState | Self::MalformedStateBody | Self::Storage => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ProviderError {
    /// Get the error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingParameter => ErrorCode::MissingParameter,
            Self::NotFound => ErrorCode::NotFound,
            Self::InvalidFormat => ErrorCode::InvalidFormat,
            Self::UnknownProviderState { .. } => ErrorCode::UnknownProviderState,
            Self::MalformedStateBody { .. } => ErrorCode::MalformedStateBody,
            Self::Storage { .. } => ErrorCode::Storage,
        }
    }

    /// Raw request payload carried by control-plane errors.
    #[must_use]
    pub fn request_payload(&self) -> Option<&str> {
        match self {
            Self::UnknownProviderState { request, .. }
            | Self::MalformedStateBody { request, .. }
            | Self::Storage { request, .. } => Some(request),
            Self::MissingParameter | Self::NotFound | Self::InvalidFormat => None,
        }
    }
}

/// Consumer-facing error body.
#[derive(Debug, Serialize)]
pub struct MessageBody<'a> {
    /// Error message
    pub message: &'a str,
}

/// Control-plane diagnostic body.
#[derive(Debug, Serialize)]
pub struct DiagnosticBody<'a> {
    /// Error code
    pub message: &'a str,
    /// Error detail
    pub detail: String,
    /// Raw request payload, verbatim
    pub request: &'a str,
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = code.status_code();
        match &self {
            Self::NotFound => status.into_response(),
            Self::MissingParameter => json_response(
                status,
                &MessageBody {
                    message: MISSING_PARAMETER_MESSAGE,
                },
            ),
            Self::InvalidFormat => json_response(
                status,
                &MessageBody {
                    message: INVALID_FORMAT_MESSAGE,
                },
            ),
            Self::UnknownProviderState { request, .. }
            | Self::MalformedStateBody { request, .. }
            | Self::Storage { request, .. } => {
                tracing::error!(
                    error_code = code.as_str(),
                    error = %self,
                    request = %request,
                    "Provider state request failed"
                );
                json_response(
                    status,
                    &DiagnosticBody {
                        message: code.as_str(),
                        detail: self.to_string(),
                        request,
                    },
                )
            }
        }
    }
}

/// Serialize `body` as a JSON response with the provider's content type.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
