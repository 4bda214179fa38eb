use super::{ProviderStateRequest, StatePhase};
use crate::config::UnknownStatePolicy;
use crate::presence::DataPresence;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// State in which validation finds backing data.
pub const STATE_DATA_PRESENT: &str = "There is data";

/// State in which validation finds no backing data.
pub const STATE_NO_DATA: &str = "There is no data";

/// Side effect bound to a state name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateAction {
    /// Ensure backing data exists
    AddData,
    /// Ensure no backing data exists
    RemoveAllData,
}

impl StateAction {
    fn run(self, presence: &dyn DataPresence) -> io::Result<()> {
        match self {
            Self::AddData => presence.set_present(),
            Self::RemoveAllData => presence.set_absent(),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::AddData => "add_data",
            Self::RemoveAllData => "remove_all_data",
        }
    }
}

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateOutcome {
    /// A registered action ran
    Applied(StateAction),
    /// Empty or absent state name
    NoState,
    /// Teardown phase, nothing to undo
    Teardown,
    /// Sent for a consumer other than the configured one
    OtherConsumer,
    /// Unregistered name under [`UnknownStatePolicy::Ignore`]
    IgnoredUnknown,
}

/// Dispatch failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Unregistered name under [`UnknownStatePolicy::Reject`]
    #[error("unknown provider state '{0}'")]
    UnknownState(String),

    /// The action's storage write failed
    #[error("{action} failed for state '{state}': {source}")]
    Storage {
        /// State being applied
        state: String,
        /// Action name
        action: &'static str,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Maps state names to actions and applies them to the data-presence oracle.
#[derive(Debug, Clone)]
pub struct ProviderStateDispatcher {
    actions: HashMap<String, StateAction>,
    presence: Arc<dyn DataPresence>,
    expected_consumer: Option<String>,
    unknown_state_policy: UnknownStatePolicy,
}

impl ProviderStateDispatcher {
    /// Dispatcher with the two built-in states registered.
    #[must_use]
    pub fn new(presence: Arc<dyn DataPresence>) -> Self {
        let actions = HashMap::from([
            (STATE_DATA_PRESENT.to_string(), StateAction::AddData),
            (STATE_NO_DATA.to_string(), StateAction::RemoveAllData),
        ]);
        Self {
            actions,
            presence,
            expected_consumer: None,
            unknown_state_policy: UnknownStatePolicy::default(),
        }
    }

    /// Only apply states sent for `consumer`. A request without a consumer
    /// field is always applied.
    #[must_use]
    pub fn with_expected_consumer(mut self, consumer: Option<String>) -> Self {
        self.expected_consumer = consumer;
        self
    }

    /// Set the handling of unregistered state names.
    #[must_use]
    pub const fn with_unknown_state_policy(mut self, policy: UnknownStatePolicy) -> Self {
        self.unknown_state_policy = policy;
        self
    }

    /// Registered state names, sorted.
    #[must_use]
    pub fn registered_states(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Apply one state-change request.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownState`] for an unregistered name under
    /// the reject policy, and [`DispatchError::Storage`] when the action fails.
    pub fn apply(&self, request: &ProviderStateRequest) -> Result<StateOutcome, DispatchError> {
        let Some(state) = request.state_name() else {
            debug!("No provider state requested");
            return Ok(StateOutcome::NoState);
        };

        if request.phase() == StatePhase::Teardown {
            debug!(state, "Provider state teardown");
            return Ok(StateOutcome::Teardown);
        }

        if let (Some(expected), Some(consumer)) = (&self.expected_consumer, &request.consumer) {
            if expected != consumer {
                debug!(
                    state,
                    consumer = %consumer,
                    expected = %expected,
                    "Provider state for another consumer"
                );
                return Ok(StateOutcome::OtherConsumer);
            }
        }

        let Some(action) = self.actions.get(state).copied() else {
            return match self.unknown_state_policy {
                UnknownStatePolicy::Reject => Err(DispatchError::UnknownState(state.to_string())),
                UnknownStatePolicy::Ignore => {
                    warn!(state, "Ignoring unknown provider state");
                    Ok(StateOutcome::IgnoredUnknown)
                }
            };
        };

        action
            .run(self.presence.as_ref())
            .map_err(|source| DispatchError::Storage {
                state: state.to_string(),
                action: action.as_str(),
                source,
            })?;

        info!(state, action = action.as_str(), "Provider state applied");
        Ok(StateOutcome::Applied(action))
    }
}
