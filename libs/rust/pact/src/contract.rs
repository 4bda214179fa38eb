//! Pact contract types.
//!
//! Mirrors the pact specification V3 JSON layout so files written here can
//! be read by other pact tooling and vice versa.

use rust_common::PlatformError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Pact specification version written into new contracts.
pub const PACT_SPECIFICATION_VERSION: &str = "3.0.0";

/// A Pact contract between consumer and provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contract {
    /// Consumer participant
    pub consumer: Participant,
    /// Provider participant
    pub provider: Participant,
    /// Contract interactions
    pub interactions: Vec<Interaction>,
    /// Contract metadata
    #[serde(default)]
    pub metadata: ContractMetadata,
}

impl Contract {
    /// Create an empty contract between two participants.
    #[must_use]
    pub fn new(consumer: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            consumer: Participant::new(consumer),
            provider: Participant::new(provider),
            interactions: Vec::new(),
            metadata: ContractMetadata::default(),
        }
    }

    /// Conventional pact file name, `<consumer>-<provider>.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}-{}.json", self.consumer.name, self.provider.name)
    }

    /// Read a contract from a pact file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid pact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlatformError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let contract: Self = serde_json::from_str(&raw)?;
        if contract.consumer.name.is_empty() || contract.provider.name.is_empty() {
            return Err(PlatformError::invalid_input(
                "pact participants must be named",
            ));
        }
        Ok(contract)
    }

    /// Write the contract into `dir` under its conventional file name,
    /// creating the directory when missing. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, PlatformError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Interactions that require the named provider state.
    pub fn interactions_given<'a>(
        &'a self,
        state: &'a str,
    ) -> impl Iterator<Item = &'a Interaction> {
        self.interactions
            .iter()
            .filter(move |i| i.provider_states.iter().any(|s| s.name == state))
    }
}

/// A participant in a contract (consumer or provider).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    /// Participant name
    pub name: String,
}

impl Participant {
    /// Create a new participant.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An interaction in a contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Interaction description
    pub description: String,
    /// Provider states (preconditions), applied in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_states: Vec<ProviderState>,
    /// Expected request
    pub request: Request,
    /// Expected response
    pub response: Response,
}

/// A named precondition with optional parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderState {
    /// State name, e.g. "There is data"
    pub name: String,
    /// State parameters
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl ProviderState {
    /// Create a state without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Map::new(),
        }
    }
}

/// HTTP request in an interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Request {
    /// HTTP method
    pub method: String,
    /// Request path
    pub path: String,
    /// Query parameters; each key may repeat
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, Vec<String>>,
    /// Request headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Request body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Request {
    /// Flatten the query map into ordered key/value pairs.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.query
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
            .collect()
    }
}

/// HTTP response in an interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Response {
    /// Look up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Contract metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractMetadata {
    /// Pact specification version
    #[serde(rename = "pactSpecification")]
    pub pact_specification: PactSpecification,
}

/// Pact specification version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PactSpecification {
    /// Version string
    pub version: String,
}

impl Default for ContractMetadata {
    fn default() -> Self {
        Self {
            pact_specification: PactSpecification {
                version: PACT_SPECIFICATION_VERSION.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_interaction() -> Interaction {
        Interaction {
            description: "A valid GET request for Date Validation".to_string(),
            provider_states: vec![ProviderState::new("There is no data")],
            request: Request {
                method: "GET".to_string(),
                path: "/api/provider".to_string(),
                query: BTreeMap::from([(
                    "validDateTime".to_string(),
                    vec!["04/04/2018".to_string()],
                )]),
                headers: BTreeMap::new(),
                body: None,
            },
            response: Response {
                status: 404,
                headers: BTreeMap::new(),
                body: None,
            },
        }
    }

    #[test]
    fn test_interaction_uses_v3_field_names() {
        let value = serde_json::to_value(sample_interaction()).unwrap();
        assert_eq!(value["providerStates"][0]["name"], json!("There is no data"));
        assert_eq!(value["request"]["query"]["validDateTime"], json!(["04/04/2018"]));
        assert!(value["response"].get("body").is_none());
        assert!(value["response"].get("headers").is_none());
    }

    #[test]
    fn test_file_name_and_write_load() {
        let mut contract = Contract::new("Consumer", "Provider");
        contract.interactions.push(sample_interaction());
        assert_eq!(contract.file_name(), "Consumer-Provider.json");

        let dir = tempfile::tempdir().unwrap();
        let path = contract.write_to_dir(dir.path().join("pacts")).unwrap();
        assert!(path.ends_with("Consumer-Provider.json"));

        let restored = Contract::load(&path).unwrap();
        assert_eq!(contract, restored);
        assert_eq!(restored.metadata.pact_specification.version, "3.0.0");
    }

    #[test]
    fn test_load_rejects_unnamed_participants() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"consumer":{"name":""},"provider":{"name":"Provider"},"interactions":[]}"#,
        )
        .unwrap();
        assert!(matches!(
            Contract::load(&path),
            Err(PlatformError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_interactions_given_filters_by_state() {
        let mut contract = Contract::new("Consumer", "Provider");
        contract.interactions.push(sample_interaction());
        assert_eq!(contract.interactions_given("There is no data").count(), 1);
        assert_eq!(contract.interactions_given("There is data").count(), 0);
    }

    #[test]
    fn test_query_pairs_and_header_lookup() {
        let interaction = sample_interaction();
        assert_eq!(
            interaction.request.query_pairs(),
            vec![("validDateTime", "04/04/2018")]
        );

        let response = Response {
            status: 200,
            headers: BTreeMap::from([(
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )]),
            body: None,
        };
        assert_eq!(
            response.header("content-type"),
            Some("application/json; charset=utf-8")
        );
    }
}
