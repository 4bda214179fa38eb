//! Request handlers.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use tracing::{debug, info};

use super::AppState;
use crate::error::{ProviderError, json_response};
use crate::provider_state::{DispatchError, parse_state_request};

/// Query parameter carrying the value to validate.
pub const VALID_DATE_TIME_PARAM: &str = "validDateTime";

/// `GET /api/provider?validDateTime=...`
///
/// Parameter names match case-insensitively; the first occurrence wins.
pub async fn validate_date_time(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ProviderError> {
    let raw = params
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(VALID_DATE_TIME_PARAM))
        .map(|(_, value)| value.as_str());

    let result = state.validator.validate(raw);
    debug!(outcome = result.outcome(), raw = ?raw, "Validated date time");

    let body = result.into_response_body()?;
    Ok(json_response(StatusCode::OK, &body))
}

/// `POST /provider-states`
///
/// The body is read raw so that malformed JSON reaches the diagnostic
/// response instead of the extractor's rejection.
pub async fn change_provider_state(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ProviderError> {
    let request = parse_state_request(&body).map_err(|e| ProviderError::MalformedStateBody {
        reason: e.to_string(),
        request: String::from_utf8_lossy(&body).into_owned(),
    })?;

    let Some(request) = request else {
        debug!("Empty provider state body");
        return Ok(StatusCode::OK);
    };

    match state.dispatcher.apply(&request) {
        Ok(outcome) => {
            info!(state = ?request.state_name(), outcome = ?outcome, "Provider state handled");
            Ok(StatusCode::OK)
        }
        Err(DispatchError::UnknownState(name)) => Err(ProviderError::UnknownProviderState {
            state: name,
            request: String::from_utf8_lossy(&body).into_owned(),
        }),
        Err(e @ DispatchError::Storage { .. }) => Err(ProviderError::Storage {
            reason: e.to_string(),
            request: String::from_utf8_lossy(&body).into_owned(),
        }),
    }
}
