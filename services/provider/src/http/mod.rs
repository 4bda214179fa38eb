//! HTTP surface: routing, shared state and the request tracing layer.

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info_span;
use uuid::Uuid;

use crate::config::{Config, DataBackend};
use crate::presence::{DataPresence, FileDataPresence, InMemoryDataPresence};
use crate::provider_state::ProviderStateDispatcher;
use crate::validation::DateTimeValidator;

/// Validation endpoint path.
pub const VALIDATE_PATH: &str = "/api/provider";

/// Provider-state control plane path.
pub const PROVIDER_STATES_PATH: &str = "/provider-states";

/// State shared by all handlers. Validator and dispatcher see the same
/// data-presence oracle.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Validation logic
    pub validator: DateTimeValidator,
    /// Provider-state dispatcher
    pub dispatcher: ProviderStateDispatcher,
    /// Shared oracle
    pub presence: Arc<dyn DataPresence>,
}

impl AppState {
    /// Wire validator and dispatcher around one oracle.
    #[must_use]
    pub fn new(presence: Arc<dyn DataPresence>, config: &Config) -> Self {
        let validator = DateTimeValidator::new(presence.clone(), config.not_found_switch.clone());
        let dispatcher = ProviderStateDispatcher::new(presence.clone())
            .with_expected_consumer(config.provider_state_consumer.clone())
            .with_unknown_state_policy(config.unknown_state_policy);
        Self {
            validator,
            dispatcher,
            presence,
        }
    }

    /// Build state with the backend named in `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(build_presence(config), config)
    }
}

/// Instantiate the configured data-presence backend.
#[must_use]
pub fn build_presence(config: &Config) -> Arc<dyn DataPresence> {
    match config.data_backend {
        DataBackend::File => Arc::new(FileDataPresence::new(config.data_file.clone())),
        DataBackend::Memory => Arc::new(InMemoryDataPresence::default()),
    }
}

/// Build the router. The control plane is only mounted when
/// `provider_states_enabled` is set.
pub fn router(state: AppState, provider_states_enabled: bool) -> Router {
    let mut router = Router::new().route(VALIDATE_PATH, get(handlers::validate_date_time));
    if provider_states_enabled {
        router = router.route(PROVIDER_STATES_PATH, post(handlers::change_provider_state));
    }

    router.with_state(state).layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http().make_span_with(
            |request: &Request<Body>| {
                info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    correlation_id = %Uuid::new_v4(),
                )
            },
        )),
    )
}
