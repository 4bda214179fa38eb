//! HTTP client construction.
//!
//! The consumer and the pact verifier both talk to the provider through a
//! client built here, so timeouts and the user agent stay consistent.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// User agent sent unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("date-validation/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout (default: 10s)
    pub request_timeout: Duration,
    /// Connection timeout (default: 2s)
    pub connect_timeout: Duration,
    /// Reuse idle connections (default: on)
    pub keep_alive: bool,
    /// Send `Accept: application/json` on every request (default: on)
    pub accept_json: bool,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(2),
            keep_alive: true,
            accept_json: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    /// Settings for replaying a pact: one connection per request so that
    /// every interaction starts clean and a provider under test can stop
    /// without waiting on idle sockets.
    #[must_use]
    pub fn for_verifier() -> Self {
        Self {
            keep_alive: false,
            accept_json: false,
            user_agent: "pact-verifier".to_string(),
            ..Self::default()
        }
    }

    /// Override the whole-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns an error if the client cannot be built (e.g., TLS initialization fails).
///
/// # Examples
///
/// ```
/// use rust_common::{HttpConfig, build_http_client};
/// use std::time::Duration;
///
/// let config = HttpConfig::default().with_request_timeout(Duration::from_secs(5));
/// assert!(build_http_client(&config).is_ok());
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if config.accept_json {
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    }

    let mut builder = ClientBuilder::new()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .default_headers(headers)
        .user_agent(&config.user_agent)
        .use_rustls_tls();
    if !config.keep_alive {
        builder = builder.pool_max_idle_per_host(0);
    }
    builder.build()
}
