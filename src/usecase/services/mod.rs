use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::usecase::ports::api::ApiError;

pub mod analytics_service;
pub mod audit_service;
pub mod fetch;
pub mod refresh;

/// Maps a response body onto its schema; shape mismatches become `Decode`.
pub(crate) fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| {
        tracing::warn!(endpoint, error = %err, "response did not match schema");
        ApiError::Decode(format!("{endpoint}: {err}"))
    })
}

/// Percent-encodes one path segment. Blank identifiers never reach the wire.
pub(crate) fn segment(what: &str, raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{what} es requerido")));
    }
    let encoded: String = url::form_urlencoded::byte_serialize(trimmed.as_bytes()).collect();
    Ok(encoded.replace('+', "%20"))
}
