//! Contract fixtures.
//!
//! The consumer tests regenerate `pacts/Consumer-Provider.json` and the
//! provider tests replay it; both locate it through this module.

use pact_contract::Contract;
use rust_common::PlatformError;
use serde_json::{Value, json};
use std::path::PathBuf;

/// Consumer name recorded in the pact.
pub const CONSUMER_NAME: &str = "Consumer";

/// Provider name recorded in the pact.
pub const PROVIDER_NAME: &str = "Provider";

/// Directory holding committed pact files.
#[must_use]
pub fn pact_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("..")
        .join("pacts")
}

/// Path of the committed consumer/provider pact.
#[must_use]
pub fn committed_pact_path() -> PathBuf {
    pact_dir().join(format!("{CONSUMER_NAME}-{PROVIDER_NAME}.json"))
}

/// Load the committed consumer/provider pact.
///
/// # Errors
///
/// Returns an error when the pact file is missing or invalid.
pub fn committed_contract() -> Result<Contract, PlatformError> {
    Contract::load(committed_pact_path())
}

/// Body the verifier posts to `/provider-states` during setup.
#[must_use]
pub fn state_change_payload(state: &str) -> Value {
    json!({
        "state": state,
        "consumer": CONSUMER_NAME,
        "params": {},
        "action": "setup",
    })
}
