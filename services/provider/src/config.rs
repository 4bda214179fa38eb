//! Type-Safe Configuration with Validation
//!
//! Provides type-safe configuration with environment variable support.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable that forces every validation to answer 404.
pub const NOT_FOUND_SWITCH_VAR: &str = "PACT_PROVIDER_SHOULD_THROW_404";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid port number
    #[error("Invalid port: must be between 1 and 65535")]
    InvalidPort,

    /// Missing required field
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// Environment variable parse error
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError {
        /// Variable name
        name: String,
        /// Parser message
        reason: String,
    },
}

/// Where the data-presence marker lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBackend {
    /// Sentinel file on disk
    File,
    /// Process-local flag
    Memory,
}

impl FromStr for DataBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown data backend '{other}', expected file or memory")),
        }
    }
}

/// What the dispatcher does with a state name nobody registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownStatePolicy {
    /// Fail with a diagnostic 500
    #[default]
    Reject,
    /// Answer 200 without side effects
    Ignore,
}

impl FromStr for UnknownStatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!("unknown policy '{other}', expected reject or ignore")),
        }
    }
}

/// Source of the forced-404 flag, consulted on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundSwitch {
    /// Read the named environment variable each time
    Env(String),
    /// Fixed value
    Fixed(bool),
}

impl Default for NotFoundSwitch {
    fn default() -> Self {
        Self::Env(NOT_FOUND_SWITCH_VAR.to_string())
    }
}

impl NotFoundSwitch {
    /// Whether validation must answer 404 right now.
    #[must_use]
    pub fn is_on(&self) -> bool {
        match self {
            Self::Env(name) => env::var(name).is_ok_and(|v| parse_flag(&v)),
            Self::Fixed(value) => *value,
        }
    }
}

/// Lenient boolean: `true` in any case, surrounding whitespace ignored.
/// Anything else, including garbage, is `false`.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Service configuration with validation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port (1-65535)
    pub port: u16,
    /// Data-presence backend
    pub data_backend: DataBackend,
    /// Sentinel file for [`DataBackend::File`]
    pub data_file: PathBuf,
    /// Mount `/provider-states`
    pub provider_states_enabled: bool,
    /// Only apply states sent for this consumer
    pub provider_state_consumer: Option<String>,
    /// Handling of unregistered state names
    pub unknown_state_policy: UnknownStatePolicy,
    /// Forced-404 flag source
    pub not_found_switch: NotFoundSwitch,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
    /// Default log filter
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9000,
            data_backend: DataBackend::File,
            data_file: PathBuf::from("data/somedata.txt"),
            provider_states_enabled: true,
            provider_state_consumer: None,
            unknown_state_policy: UnknownStatePolicy::Reject,
            not_found_switch: NotFoundSwitch::default(),
            shutdown_timeout_seconds: 30,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with validation.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT", defaults.port)?,
            data_backend: parse_env("DATA_BACKEND", defaults.data_backend)?,
            data_file: env::var("DATA_FILE").map_or(defaults.data_file, PathBuf::from),
            provider_states_enabled: parse_env(
                "PROVIDER_STATES_ENABLED",
                defaults.provider_states_enabled,
            )?,
            provider_state_consumer: env::var("PROVIDER_STATE_CONSUMER")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            unknown_state_policy: parse_env(
                "UNKNOWN_STATE_POLICY",
                defaults.unknown_state_policy,
            )?,
            not_found_switch: defaults.not_found_switch,
            shutdown_timeout_seconds: parse_env(
                "SHUTDOWN_TIMEOUT",
                defaults.shutdown_timeout_seconds,
            )?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: parse_env("LOG_JSON", defaults.log_json)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingRequired("host".to_string()));
        }
        if self.data_backend == DataBackend::File && self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("data_file".to_string()));
        }
        Ok(())
    }

    /// Socket address string to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse an environment variable with a default value.
fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    parse_value(name, env::var(name).ok(), default)
}

fn parse_value<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match raw {
        Some(val) => val.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
