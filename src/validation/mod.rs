//! Client-side request validation.
//!
//! Validation runs synchronously on the JSON body before any network call and
//! reports the *first* violation it meets. Checks run in a fixed order:
//! `models` first, then the other required fields, then optional fields in
//! declaration order. Nothing is mutated and no state is kept between calls.
//!
//! ```rust
//! use modelhub_rust::types::RequestKind;
//! use modelhub_rust::validation::validate;
//! use serde_json::json;
//!
//! assert!(validate(RequestKind::AudioGenerate, &json!({"models": ["m1"], "prompt": "hello"})).is_ok());
//!
//! let err = validate(RequestKind::AudioGenerate, &json!({"models": [], "prompt": "hello"})).unwrap_err();
//! assert_eq!(err.message(), "models must be a non-empty array of strings");
//! ```

mod messages;
mod rules;

pub use messages::{check_content_object, check_messages};
pub use rules::{
    check_dimensions, check_min_integer, check_models, check_non_empty_string,
    check_non_negative_number, check_nullable_integer, check_number, check_number_range,
    check_optional_string, check_positive_number, check_ratio, check_single_model,
};

use serde_json::{Map, Value};

use crate::types::{RequestKind, TypedRequest};
use crate::{Error, Result};

/// Validates a request body of the given kind.
pub fn validate(kind: RequestKind, body: &Value) -> Result<()> {
    let body = rules::require_object(body)?;
    match kind {
        RequestKind::ChatCompletion | RequestKind::Combination => validate_chat(body),
        // Messages are not checked for comparison; only the model list is.
        RequestKind::Comparison => check_models(body),
        RequestKind::Search => {
            check_models(body)?;
            check_non_empty_string(body, "query")?;
            check_min_integer(body, "max_results", 1)
        }
        RequestKind::ImageGenerate => {
            check_models(body)?;
            check_non_empty_string(body, "prompt")?;
            check_image_options(body)?;
            check_ratio(body, "aspect_ratio")?;
            check_dimensions(body, "size")?;
            check_optional_string(body, "negative_prompt")
        }
        RequestKind::ImageEdit => {
            check_models(body)?;
            check_non_empty_string(body, "prompt")?;
            check_non_empty_string(body, "image")?;
            check_optional_string(body, "mask")?;
            check_image_options(body)?;
            check_dimensions(body, "size")
        }
        RequestKind::AudioGenerate => {
            check_models(body)?;
            check_non_empty_string(body, "prompt")?;
            check_positive_number(body, "duration")?;
            check_nullable_integer(body, "seed")
        }
        RequestKind::TextToSpeech => {
            check_models(body)?;
            check_single_model(body, kind.operation_name())?;
            check_non_empty_string(body, "text")?;
            check_optional_string(body, "voice")?;
            check_positive_number(body, "speed")
        }
        RequestKind::SpeechToText => {
            check_models(body)?;
            check_single_model(body, kind.operation_name())?;
            check_non_empty_string(body, "file")?;
            check_optional_string(body, "language")?;
            check_optional_string(body, "prompt")
        }
        RequestKind::VideoGenerate => {
            check_models(body)?;
            check_non_empty_string(body, "prompt")?;
            check_positive_number(body, "duration")?;
            check_positive_number(body, "fps")?;
            check_ratio(body, "aspect_ratio")?;
            check_dimensions(body, "resolution")?;
            check_nullable_integer(body, "seed")
        }
        // Only the model list is checked for video edits.
        RequestKind::VideoEdit => check_models(body),
        RequestKind::VideoStatus => Ok(()),
    }
}

/// Serializes a typed request and validates the resulting body.
///
/// Returns the body so callers send exactly what was validated.
pub fn validate_request<T: TypedRequest>(kind: RequestKind, request: &T) -> Result<Value> {
    let body = serde_json::to_value(request)?;
    validate(kind, &body)?;
    check_finite(request)?;
    Ok(body)
}

/// Set float fields must be finite; NaN and infinities would go out as `null`.
pub fn check_finite<T: TypedRequest>(request: &T) -> Result<()> {
    match request.float_fields().into_iter().find(|(_, v)| !v.is_finite()) {
        Some((field, _)) => Err(Error::validation(format!("{} must be a number", field), field)),
        None => Ok(()),
    }
}

fn validate_chat(body: &Map<String, Value>) -> Result<()> {
    check_models(body)?;
    check_messages(body)?;
    check_non_negative_number(body, "temperature")?;
    check_number_range(body, "top_p", 0.0, 1.0)?;
    check_min_integer(body, "max_tokens", 1)?;
    check_number(body, "frequency_penalty")?;
    check_number(body, "presence_penalty")
}

fn check_image_options(body: &Map<String, Value>) -> Result<()> {
    check_min_integer(body, "n", 1)?;
    check_min_integer(body, "width", 64)?;
    check_min_integer(body, "height", 64)?;
    check_nullable_integer(body, "seed")
}
