//! Consumer-side builder for recording interactions into a contract.

use crate::contract::{Contract, Interaction, ProviderState, Request, Response};
use rust_common::PlatformError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Collects interactions for one consumer/provider pair.
#[derive(Debug, Clone)]
pub struct PactBuilder {
    contract: Contract,
}

impl PactBuilder {
    /// Start a new contract.
    #[must_use]
    pub fn new(consumer: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            contract: Contract::new(consumer, provider),
        }
    }

    /// Begin describing a new interaction.
    #[must_use]
    pub fn upon_receiving(description: impl Into<String>) -> InteractionBuilder {
        InteractionBuilder::new(description)
    }

    /// Record an interaction. An interaction with the same description and
    /// provider states replaces the earlier one.
    pub fn add(&mut self, interaction: Interaction) -> &mut Self {
        let existing = self.contract.interactions.iter_mut().find(|i| {
            i.description == interaction.description
                && i.provider_states == interaction.provider_states
        });
        match existing {
            Some(slot) => *slot = interaction,
            None => self.contract.interactions.push(interaction),
        }
        self
    }

    /// Interactions recorded so far.
    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.contract.interactions
    }

    /// Finish and return the contract.
    #[must_use]
    pub fn build(self) -> Contract {
        self.contract
    }

    /// Finish and write the pact file into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pact has no interactions or cannot be written.
    pub fn write(self, dir: impl AsRef<Path>) -> Result<PathBuf, PlatformError> {
        if self.contract.interactions.is_empty() {
            return Err(PlatformError::invalid_input(
                "refusing to write a pact without interactions",
            ));
        }
        self.contract.write_to_dir(dir)
    }
}

/// Request half of an interaction under construction.
#[derive(Debug, Clone)]
pub struct InteractionBuilder {
    description: String,
    provider_states: Vec<ProviderState>,
    request: Request,
}

impl InteractionBuilder {
    fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            provider_states: Vec::new(),
            request: Request {
                method: "GET".to_string(),
                path: "/".to_string(),
                query: BTreeMap::new(),
                headers: BTreeMap::new(),
                body: None,
            },
        }
    }

    /// Require a provider state before the request is replayed.
    #[must_use]
    pub fn given(mut self, state: impl Into<String>) -> Self {
        self.provider_states.push(ProviderState::new(state));
        self
    }

    /// Require a provider state with parameters.
    #[must_use]
    pub fn given_with_params(
        mut self,
        state: impl Into<String>,
        params: Map<String, Value>,
    ) -> Self {
        self.provider_states.push(ProviderState {
            name: state.into(),
            params,
        });
        self
    }

    /// Set the request method and path.
    #[must_use]
    pub fn with_request(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.request.method = method.into().to_ascii_uppercase();
        self.request.path = path.into();
        self
    }

    /// Append a query parameter value.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .query
            .entry(key.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Add a request header.
    #[must_use]
    pub fn with_request_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.request.headers.insert(name.into(), value.into());
        self
    }

    /// Set a JSON request body.
    #[must_use]
    pub fn with_request_body(mut self, body: Value) -> Self {
        self.request.body = Some(body);
        self
    }

    /// Switch to describing the expected response.
    #[must_use]
    pub fn will_respond_with(self, status: u16) -> ResponseBuilder {
        ResponseBuilder {
            request: self,
            response: Response {
                status,
                headers: BTreeMap::new(),
                body: None,
            },
        }
    }
}

/// Response half of an interaction under construction.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    request: InteractionBuilder,
    response: Response,
}

impl ResponseBuilder {
    /// Expect a response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.response.headers.insert(name.into(), value.into());
        self
    }

    /// Expect a JSON response body.
    #[must_use]
    pub fn with_json_body(mut self, body: Value) -> Self {
        self.response.body = Some(body);
        self
    }

    /// Produce the finished interaction.
    #[must_use]
    pub fn build(self) -> Interaction {
        Interaction {
            description: self.request.description,
            provider_states: self.request.provider_states,
            request: self.request.request,
            response: self.response,
        }
    }
}
