//! Error classification logic
//!
//! Maps the outcome of an exchange to exactly one typed [`Error`]:
//! - the exchange never completed: [`Error::Connection`]
//! - non-success status: the kind from the status table in [`crate::error_code`]
//! - success status but undecodable body: [`Error::Api`] with `INVALID_RESPONSE`

use serde_json::Value;

use crate::transport::TransportError;
use crate::{Error, Result};

/// Message used when the body is an HTML page or carries no usable message.
pub const UNKNOWN_FORMAT_MESSAGE: &str =
    "Server responded with unknown format. Please try again later.";

/// True when the text contains a doctype or an `<html` tag anywhere.
pub fn looks_like_html(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower.contains("<!doctype") || lower.contains("<html")
}

/// Derives the human-readable message for an error response body.
///
/// Reverse-proxy error pages, bodies that are not JSON, and JSON without a
/// `message`/`error` field all collapse to [`UNKNOWN_FORMAT_MESSAGE`].
pub fn derive_message(body: &str) -> String {
    if looks_like_html(body) {
        return UNKNOWN_FORMAT_MESSAGE.to_string();
    }
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return UNKNOWN_FORMAT_MESSAGE.to_string();
    };

    let raw_is_html = json
        .get("details")
        .and_then(|d| d.get("raw"))
        .and_then(Value::as_str)
        .map(looks_like_html)
        .unwrap_or(false);
    if raw_is_html {
        return UNKNOWN_FORMAT_MESSAGE.to_string();
    }

    json.get("message")
        .or_else(|| json.get("error"))
        .filter(|v| !v.is_null())
        .map(stringify)
        .unwrap_or_else(|| UNKNOWN_FORMAT_MESSAGE.to_string())
}

fn stringify(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Classifies a completed exchange with a non-success status.
pub fn classify_response(status: u16, body: &str) -> Error {
    Error::from_status(status, derive_message(body))
}

/// Classifies a failure raised by the transport itself.
pub fn classify_transport_error(err: TransportError) -> Error {
    match err {
        TransportError::Typed(e) => e,
        TransportError::Http(e) if e.is_builder() => Error::unexpected(e.to_string()),
        TransportError::Http(e) => Error::connection(e.to_string()),
        TransportError::Network(msg) => Error::connection(msg),
        TransportError::Other(msg) => Error::unexpected(msg),
    }
}

/// Decodes a success body. No reshaping is applied.
pub fn decode_success(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| Error::invalid_response(e.to_string()))
}
