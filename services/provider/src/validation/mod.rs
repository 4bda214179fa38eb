//! Date-time validation.
//!
//! The decision is evaluated in a fixed order, so when several conditions
//! hold the earlier one wins:
//! 1. parameter absent or empty → [`ValidationResult::MissingParameter`]
//! 2. forced-404 switch on, or no backing data → [`ValidationResult::NotFound`]
//! 3. unparsable → [`ValidationResult::InvalidFormat`]
//! 4. otherwise → [`ValidationResult::Valid`]

mod parser;

pub use parser::{CANONICAL_FORMAT, parse_date_time, to_canonical};

use crate::config::NotFoundSwitch;
use crate::error::ProviderError;
use crate::presence::DataPresence;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Label attached to every successful validation.
pub const VALID_LABEL: &str = "NO";

/// Outcome of validating one `validDateTime` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Parameter absent or empty
    MissingParameter,
    /// No backing data
    NotFound,
    /// Not a date or time
    InvalidFormat,
    /// Parsed successfully
    Valid {
        /// Fixed label, see [`VALID_LABEL`]
        label: String,
        /// Parsed value
        parsed_date_time: NaiveDateTime,
    },
}

impl ValidationResult {
    /// Short name for logs.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::MissingParameter => "missing_parameter",
            Self::NotFound => "not_found",
            Self::InvalidFormat => "invalid_format",
            Self::Valid { .. } => "valid",
        }
    }

    /// Convert into the success body or the error that renders the failure.
    ///
    /// # Errors
    ///
    /// Returns the matching [`ProviderError`] for every non-valid outcome.
    pub fn into_response_body(self) -> Result<ValidationResponse, ProviderError> {
        match self {
            Self::MissingParameter => Err(ProviderError::MissingParameter),
            Self::NotFound => Err(ProviderError::NotFound),
            Self::InvalidFormat => Err(ProviderError::InvalidFormat),
            Self::Valid {
                label,
                parsed_date_time,
            } => Ok(ValidationResponse {
                test: label,
                valid_date_time: to_canonical(&parsed_date_time),
            }),
        }
    }
}

/// Success body of `GET /api/provider`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// Always [`VALID_LABEL`]
    pub test: String,
    /// Parsed value in `dd-MM-yyyy HH:mm:ss`
    #[serde(rename = "validDateTime")]
    pub valid_date_time: String,
}

/// Validates date-time strings against the current data-presence state.
#[derive(Debug, Clone)]
pub struct DateTimeValidator {
    presence: Arc<dyn DataPresence>,
    not_found: NotFoundSwitch,
}

impl DateTimeValidator {
    /// Create a validator reading `presence` on every call.
    #[must_use]
    pub fn new(presence: Arc<dyn DataPresence>, not_found: NotFoundSwitch) -> Self {
        Self {
            presence,
            not_found,
        }
    }

    /// Validate a raw `validDateTime` value.
    #[must_use]
    pub fn validate(&self, raw: Option<&str>) -> ValidationResult {
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            return ValidationResult::MissingParameter;
        };

        if self.not_found.is_on() || !self.presence.exists() {
            return ValidationResult::NotFound;
        }

        match parse_date_time(raw) {
            Some(parsed_date_time) => ValidationResult::Valid {
                label: VALID_LABEL.to_string(),
                parsed_date_time,
            },
            None => ValidationResult::InvalidFormat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::InMemoryDataPresence;

    fn validator(present: bool, forced: bool) -> DateTimeValidator {
        DateTimeValidator::new(
            Arc::new(InMemoryDataPresence::new(present)),
            NotFoundSwitch::Fixed(forced),
        )
    }

    #[test]
    fn test_missing_wins_over_everything() {
        for (present, forced) in [(true, false), (false, false), (true, true)] {
            let v = validator(present, forced);
            assert_eq!(v.validate(None), ValidationResult::MissingParameter);
            assert_eq!(v.validate(Some("")), ValidationResult::MissingParameter);
        }
    }

    #[test]
    fn test_absence_wins_over_parse_failure() {
        let v = validator(false, false);
        assert_eq!(v.validate(Some("04/04/2018")), ValidationResult::NotFound);
        assert_eq!(v.validate(Some("lolz")), ValidationResult::NotFound);
    }

    #[test]
    fn test_forced_not_found_switch() {
        let v = validator(true, true);
        assert_eq!(v.validate(Some("04/04/2018")), ValidationResult::NotFound);
    }

    #[test]
    fn test_invalid_format_with_data() {
        let v = validator(true, false);
        assert_eq!(v.validate(Some("lolz")), ValidationResult::InvalidFormat);
        assert_eq!(v.validate(Some("   ")), ValidationResult::InvalidFormat);
    }

    #[test]
    fn test_valid_body() {
        let body = validator(true, false)
            .validate(Some("04/05/2018"))
            .into_response_body()
            .unwrap();
        assert_eq!(body.test, "NO");
        assert_eq!(body.valid_date_time, "05-04-2018 00:00:00");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["validDateTime"], "05-04-2018 00:00:00");
    }

    #[test]
    fn test_validator_reads_latest_presence() {
        let presence = Arc::new(InMemoryDataPresence::new(false));
        let v = DateTimeValidator::new(presence.clone(), NotFoundSwitch::Fixed(false));
        assert_eq!(v.validate(Some("04/04/2018")).outcome(), "not_found");

        presence.set_present().unwrap();
        assert_eq!(v.validate(Some("04/04/2018")).outcome(), "valid");
    }
}
