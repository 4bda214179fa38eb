//! HTTP client for the date validation provider.

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use rust_common::{HttpConfig, build_http_client};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::ConsumerError;

/// Provider path serving date validation.
pub const VALIDATE_PATH: &str = "/api/provider";

/// What the provider answered, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header, if any
    pub content_type: Option<String>,
    /// Raw body text
    pub body: String,
}

impl ProviderResponse {
    /// Body parsed as JSON; `None` when empty or not JSON.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Calls `GET /api/provider` on a provider.
#[derive(Debug, Clone)]
pub struct ConsumerApiClient {
    client: Client,
    base_url: Url,
}

impl ConsumerApiClient {
    /// Create a client for the provider at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is unusable or the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str) -> Result<Self, ConsumerError> {
        let client = build_http_client(&HttpConfig::default()).map_err(ConsumerError::Client)?;
        Self::with_client(base_url, client)
    }

    /// Create a client reusing `client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is not an absolute http(s) URI.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, ConsumerError> {
        let parsed =
            Url::parse(base_url).map_err(|e| ConsumerError::invalid_base_uri(base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConsumerError::invalid_base_uri(
                base_url,
                "scheme must be http or https",
            ));
        }
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Provider base URI.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ask the provider to validate `date_time`.
    ///
    /// Every HTTP status is returned as a [`ProviderResponse`].
    ///
    /// # Errors
    ///
    /// Returns [`ConsumerError::ProviderUnreachable`] when the request cannot
    /// be sent or the body cannot be read.
    pub async fn validate_date_time(
        &self,
        date_time: &str,
    ) -> Result<ProviderResponse, ConsumerError> {
        let url = self
            .base_url
            .join(VALIDATE_PATH)
            .map_err(|e| ConsumerError::invalid_base_uri(self.base_url.as_str(), e))?;
        debug!(url = %url, date_time, "Validating date time");

        let response = self
            .client
            .get(url)
            .query(&[("validDateTime", date_time)])
            .send()
            .await
            .map_err(ConsumerError::ProviderUnreachable)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(ConsumerError::ProviderUnreachable)?;

        debug!(status, "Provider answered");
        Ok(ProviderResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unusable_base_uris() {
        assert!(matches!(
            ConsumerApiClient::new("not a uri"),
            Err(ConsumerError::InvalidBaseUri { .. })
        ));
        assert!(matches!(
            ConsumerApiClient::new("ftp://localhost:9000"),
            Err(ConsumerError::InvalidBaseUri { .. })
        ));
        assert!(ConsumerApiClient::new("http://localhost:9000").is_ok());
    }

    #[test]
    fn test_response_json() {
        let response = ProviderResponse {
            status: 404,
            content_type: None,
            body: String::new(),
        };
        assert!(response.json().is_none());
        assert!(!response.is_success());

        let response = ProviderResponse {
            status: 200,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: r#"{"test":"NO"}"#.to_string(),
        };
        assert_eq!(response.json().unwrap()["test"], "NO");
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ConsumerApiClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
        let err = client.validate_date_time("04/05/2018").await.unwrap_err();
        assert!(matches!(err, ConsumerError::ProviderUnreachable(_)));
        assert_eq!(err.to_string(), "There was a problem connecting to Provider API.");
    }
}
