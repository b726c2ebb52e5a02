//! Shared field checks reused across request kinds.
//!
//! Optional-field checks treat an absent key and an explicit `null` the same
//! way: the platform default applies and nothing is checked.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::{Error, Result};

static RATIO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)?:\d+(\.\d+)?$").expect("static regex"));
static DIMENSIONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+x\d+$").expect("static regex"));

pub(crate) fn require_object(body: &Value) -> Result<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| Error::validation("request must be a JSON object", "$"))
}

fn present<'a>(body: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    body.get(field).filter(|v| !v.is_null())
}

/// `models` must be a non-empty array whose elements are all strings.
pub fn check_models(body: &Map<String, Value>) -> Result<()> {
    let models = body
        .get("models")
        .and_then(Value::as_array)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| Error::validation("models must be a non-empty array of strings", "models"))?;

    if let Some(idx) = models.iter().position(|m| !m.is_string()) {
        return Err(Error::validation(
            "all elements in models must be strings",
            format!("models[{}]", idx),
        ));
    }
    Ok(())
}

/// For operations without multi-model fan-out. Assumes [`check_models`] passed.
pub fn check_single_model(body: &Map<String, Value>, operation: &str) -> Result<()> {
    let count = body
        .get("models")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    if count > 1 {
        return Err(Error::validation(
            format!("{} supports exactly one model", operation),
            "models",
        ));
    }
    Ok(())
}

/// Required string that must be non-empty after trimming.
pub fn check_non_empty_string(body: &Map<String, Value>, field: &str) -> Result<()> {
    match body.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(Error::validation(
            format!("{} must be a non-empty string", field),
            field,
        )),
    }
}

pub fn check_optional_string(body: &Map<String, Value>, field: &str) -> Result<()> {
    match present(body, field) {
        Some(v) if !v.is_string() => Err(Error::validation(
            format!("{} must be a string", field),
            field,
        )),
        _ => Ok(()),
    }
}

/// Optional integer with a lower bound.
pub fn check_min_integer(body: &Map<String, Value>, field: &str, min: i64) -> Result<()> {
    let Some(v) = present(body, field) else {
        return Ok(());
    };
    match v.as_i64() {
        Some(n) if n >= min => Ok(()),
        _ => Err(Error::validation(
            format!("{} must be an integer >= {}", field, min),
            field,
        )),
    }
}

/// Optional integer that may also be explicitly `null`.
pub fn check_nullable_integer(body: &Map<String, Value>, field: &str) -> Result<()> {
    match present(body, field) {
        Some(v) if !(v.is_i64() || v.is_u64()) => Err(Error::validation(
            format!("{} must be an integer or null", field),
            field,
        )),
        _ => Ok(()),
    }
}

pub fn check_number(body: &Map<String, Value>, field: &str) -> Result<()> {
    match present(body, field) {
        Some(v) if !v.is_number() => Err(Error::validation(
            format!("{} must be a number", field),
            field,
        )),
        _ => Ok(()),
    }
}

/// Optional number in the inclusive range `[min, max]`.
pub fn check_number_range(body: &Map<String, Value>, field: &str, min: f64, max: f64) -> Result<()> {
    let Some(v) = present(body, field) else {
        return Ok(());
    };
    match v.as_f64() {
        Some(n) if n >= min && n <= max => Ok(()),
        _ => Err(Error::validation(
            format!("{} must be a number between {} and {}", field, min, max),
            field,
        )),
    }
}

/// Optional number that may be zero but not negative.
pub fn check_non_negative_number(body: &Map<String, Value>, field: &str) -> Result<()> {
    let Some(v) = present(body, field) else {
        return Ok(());
    };
    match v.as_f64() {
        Some(n) if n >= 0.0 => Ok(()),
        _ => Err(Error::validation(
            format!("{} must be a non-negative number", field),
            field,
        )),
    }
}

/// Optional number strictly greater than zero.
pub fn check_positive_number(body: &Map<String, Value>, field: &str) -> Result<()> {
    let Some(v) = present(body, field) else {
        return Ok(());
    };
    match v.as_f64() {
        Some(n) if n > 0.0 => Ok(()),
        _ => Err(Error::validation(
            format!("{} must be a positive number", field),
            field,
        )),
    }
}

/// Optional `"<number>:<number>"` string.
pub fn check_ratio(body: &Map<String, Value>, field: &str) -> Result<()> {
    check_pattern(body, field, &RATIO_RE, "\"<number>:<number>\"")
}

/// Optional `"<number>x<number>"` string.
pub fn check_dimensions(body: &Map<String, Value>, field: &str) -> Result<()> {
    check_pattern(body, field, &DIMENSIONS_RE, "\"<number>x<number>\"")
}

fn check_pattern(body: &Map<String, Value>, field: &str, re: &Regex, shape: &str) -> Result<()> {
    let Some(v) = present(body, field) else {
        return Ok(());
    };
    match v.as_str() {
        Some(s) if re.is_match(s.trim()) => Ok(()),
        _ => Err(Error::validation(
            format!("{} must be a string of the form {}", field, shape),
            field,
        )),
    }
}
