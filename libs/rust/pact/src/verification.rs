//! Provider verification: replays a contract against a running provider.
//!
//! For every interaction the verifier posts each provider state to the
//! state-change URL, issues the recorded request, compares the response and
//! finally posts a teardown for the same states. Failures are reported once
//! and never retried.

use crate::contract::{Contract, Interaction, ProviderState};
use chrono::Utc;
use reqwest::{Client, Method};
use rust_common::{HttpConfig, PlatformError, build_http_client};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Phase sent with a provider-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatePhase {
    /// Before the interaction is replayed
    Setup,
    /// After the interaction completed
    Teardown,
}

impl StatePhase {
    /// Wire value of the `action` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Teardown => "teardown",
        }
    }
}

/// A single difference between the expected and actual exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// The provider rejected a state change
    #[error("provider state '{state}' ({phase}) failed with status {status}")]
    StateChange {
        /// State name
        state: String,
        /// setup or teardown
        phase: String,
        /// HTTP status returned by the state endpoint
        status: u16,
    },

    /// Response status differs
    #[error("expected status {expected} but got {actual}")]
    Status {
        /// Expected status
        expected: u16,
        /// Actual status
        actual: u16,
    },

    /// Expected header missing or different
    #[error("expected header {name}: '{expected}' but got {actual:?}")]
    Header {
        /// Header name
        name: String,
        /// Expected value
        expected: String,
        /// Actual value, if present
        actual: Option<String>,
    },

    /// Response body differs
    #[error("expected body {expected} but got {actual:?}")]
    Body {
        /// Expected JSON body
        expected: Value,
        /// Actual body, `None` when absent or not JSON
        actual: Option<Value>,
    },

    /// The request never produced a response
    #[error("request failed: {reason}")]
    Transport {
        /// Client error message
        reason: String,
    },
}

impl Mismatch {
    fn transport(error: impl ToString) -> Self {
        Self::Transport {
            reason: error.to_string(),
        }
    }
}

/// Outcome of one replayed interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResult {
    /// Interaction description
    pub description: String,
    /// Provider states that were set up
    pub provider_states: Vec<String>,
    /// Differences found; empty on success
    pub mismatches: Vec<Mismatch>,
}

impl InteractionResult {
    /// Whether the interaction verified cleanly.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Verification result for a whole contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether every interaction verified
    pub success: bool,
    /// Provider name
    pub provider: String,
    /// Consumer name
    pub consumer: String,
    /// Per-interaction outcomes, in contract order
    pub interactions: Vec<InteractionResult>,
    /// Verification timestamp (RFC 3339)
    pub verified_at: String,
}

impl VerificationResult {
    /// Interactions that failed.
    pub fn failures(&self) -> impl Iterator<Item = &InteractionResult> {
        self.interactions.iter().filter(|r| !r.passed())
    }

    /// Human-readable report, one line per mismatch.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Verifying a pact between {} and {}: {}",
            self.consumer,
            self.provider,
            if self.success { "OK" } else { "FAILED" }
        )];
        for result in &self.interactions {
            let status = if result.passed() { "OK" } else { "FAILED" };
            lines.push(format!("  {} ({status})", result.description));
            for mismatch in &result.mismatches {
                lines.push(format!("    - {mismatch}"));
            }
        }
        lines.join("\n")
    }
}

/// Replays contracts against a provider over real HTTP.
#[derive(Debug, Clone)]
pub struct ProviderVerifier {
    client: Client,
    provider_name: String,
    base_url: Url,
    state_change_url: Option<Url>,
}

impl ProviderVerifier {
    /// Create a verifier for the provider served at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(provider_name: impl Into<String>, base_url: &str) -> Result<Self, PlatformError> {
        let base_url = Url::parse(base_url).map_err(|e| PlatformError::invalid_url(base_url, e))?;
        let client = build_http_client(&HttpConfig::for_verifier())?;
        Ok(Self {
            client,
            provider_name: provider_name.into(),
            base_url,
            state_change_url: None,
        })
    }

    /// Post provider states to this URL before each interaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_state_change_url(mut self, url: &str) -> Result<Self, PlatformError> {
        self.state_change_url =
            Some(Url::parse(url).map_err(|e| PlatformError::invalid_url(url, e))?);
        Ok(self)
    }

    /// Use a caller-supplied HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Verify every interaction of `contract` in order.
    ///
    /// # Errors
    ///
    /// Returns an error when the contract names a different provider.
    pub async fn verify(&self, contract: &Contract) -> Result<VerificationResult, PlatformError> {
        if contract.provider.name != self.provider_name {
            return Err(PlatformError::invalid_input(format!(
                "pact is for provider '{}', not '{}'",
                contract.provider.name, self.provider_name
            )));
        }

        let mut interactions = Vec::with_capacity(contract.interactions.len());
        for interaction in &contract.interactions {
            let result = self
                .verify_interaction(&contract.consumer.name, interaction)
                .await;
            if result.passed() {
                info!(interaction = %result.description, "Interaction verified");
            } else {
                warn!(
                    interaction = %result.description,
                    mismatches = result.mismatches.len(),
                    "Interaction failed verification"
                );
            }
            interactions.push(result);
        }

        Ok(VerificationResult {
            success: interactions.iter().all(InteractionResult::passed),
            provider: contract.provider.name.clone(),
            consumer: contract.consumer.name.clone(),
            interactions,
            verified_at: Utc::now().to_rfc3339(),
        })
    }

    async fn verify_interaction(
        &self,
        consumer: &str,
        interaction: &Interaction,
    ) -> InteractionResult {
        let mut mismatches = Vec::new();

        for state in &interaction.provider_states {
            if let Err(mismatch) = self.change_state(consumer, state, StatePhase::Setup).await {
                mismatches.push(mismatch);
            }
        }

        // A failed setup makes the replay meaningless.
        if mismatches.is_empty() {
            mismatches.extend(self.replay(interaction).await);
        }

        for state in &interaction.provider_states {
            if let Err(mismatch) = self.change_state(consumer, state, StatePhase::Teardown).await {
                mismatches.push(mismatch);
            }
        }

        InteractionResult {
            description: interaction.description.clone(),
            provider_states: interaction
                .provider_states
                .iter()
                .map(|s| s.name.clone())
                .collect(),
            mismatches,
        }
    }

    async fn change_state(
        &self,
        consumer: &str,
        state: &ProviderState,
        phase: StatePhase,
    ) -> Result<(), Mismatch> {
        let Some(url) = &self.state_change_url else {
            return Ok(());
        };

        debug!(state = %state.name, action = phase.as_str(), "Changing provider state");
        let body = json!({
            "state": state.name,
            "consumer": consumer,
            "params": state.params,
            "action": phase.as_str(),
        });

        let response = self
            .client
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(Mismatch::transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Mismatch::StateChange {
                state: state.name.clone(),
                phase: phase.as_str().to_string(),
                status: status.as_u16(),
            })
        }
    }

    async fn replay(&self, interaction: &Interaction) -> Vec<Mismatch> {
        let expected = &interaction.response;
        let request = &interaction.request;

        let url = match self.base_url.join(&request.path) {
            Ok(url) => url,
            Err(e) => return vec![Mismatch::transport(e)],
        };
        let method = match Method::from_bytes(request.method.as_bytes()) {
            Ok(method) => method,
            Err(e) => return vec![Mismatch::transport(e)],
        };

        let mut builder = self.client.request(method, url).query(&request.query_pairs());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return vec![Mismatch::transport(e)],
        };

        let mut mismatches = Vec::new();
        let actual_status = response.status().as_u16();
        if actual_status != expected.status {
            mismatches.push(Mismatch::Status {
                expected: expected.status,
                actual: actual_status,
            });
        }

        for (name, value) in &expected.headers {
            let actual = response
                .headers()
                .get(name.as_str())
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            if actual.as_deref() != Some(value.as_str()) {
                mismatches.push(Mismatch::Header {
                    name: name.clone(),
                    expected: value.clone(),
                    actual,
                });
            }
        }

        if let Some(expected_body) = &expected.body {
            let actual_body = match response.bytes().await {
                Ok(bytes) => serde_json::from_slice::<Value>(&bytes).ok(),
                Err(e) => return vec![Mismatch::transport(e)],
            };
            if actual_body.as_ref() != Some(expected_body) {
                mismatches.push(Mismatch::Body {
                    expected: expected_body.clone(),
                    actual: actual_body,
                });
            }
        }

        mismatches
    }
}
