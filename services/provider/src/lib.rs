//! Date Provider - date validation service with a provider-state control plane.
//!
//! `GET /api/provider?validDateTime=` validates a date or time against a
//! data-presence oracle. `POST /provider-states` lets a contract verifier put
//! that oracle into a named state before each replayed interaction.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod presence;
pub mod provider_state;
pub mod shutdown;
pub mod validation;

pub use config::{Config, ConfigError, DataBackend, NotFoundSwitch, UnknownStatePolicy};
pub use error::{ErrorCode, ProviderError};
pub use http::{AppState, build_presence, router};
pub use presence::{DataPresence, FileDataPresence, InMemoryDataPresence};
pub use provider_state::{
    ProviderStateDispatcher, ProviderStateRequest, STATE_DATA_PRESENT, STATE_NO_DATA,
};
pub use validation::{DateTimeValidator, ValidationResponse, ValidationResult};
