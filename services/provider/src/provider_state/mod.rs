//! Provider-state control plane.
//!
//! A contract verifier posts a named state before each replayed interaction
//! and the dispatcher forces the backing data into that state. Body shape:
//!
//! ```json
//! {"state": "There is data", "consumer": "Consumer", "params": {}, "action": "setup"}
//! ```

mod dispatcher;

pub use dispatcher::{
    DispatchError, ProviderStateDispatcher, STATE_DATA_PRESENT, STATE_NO_DATA, StateAction,
    StateOutcome,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Phase of a provider-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatePhase {
    /// Prepare state before the interaction
    Setup,
    /// Clean up after the interaction
    Teardown,
}

/// Body of `POST /provider-states`.
///
/// Field names are matched in lower or title case since verifiers differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStateRequest {
    /// State name; empty or absent means "no state"
    #[serde(default, alias = "State")]
    pub state: Option<String>,
    /// Consumer the state is set up for
    #[serde(default, alias = "Consumer")]
    pub consumer: Option<String>,
    /// State parameters
    #[serde(default, alias = "Params")]
    pub params: Option<Map<String, Value>>,
    /// Setup or teardown; absent means setup
    #[serde(default, alias = "Action")]
    pub action: Option<StatePhase>,
}

impl ProviderStateRequest {
    /// Request for the named state with no consumer or params.
    #[must_use]
    pub fn for_state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            ..Self::default()
        }
    }

    /// Trimmed state name, `None` when empty or absent.
    #[must_use]
    pub fn state_name(&self) -> Option<&str> {
        self.state.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Effective phase; absent means setup.
    #[must_use]
    pub fn phase(&self) -> StatePhase {
        self.action.unwrap_or(StatePhase::Setup)
    }
}

/// Parse a raw state-change body. An empty body or JSON `null` carries no
/// state and yields `Ok(None)`.
///
/// # Errors
///
/// Returns the deserializer error for anything that is not a state object.
pub fn parse_state_request(body: &[u8]) -> Result<Option<ProviderStateRequest>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
}
