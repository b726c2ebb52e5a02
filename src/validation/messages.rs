//! Chat-family `messages` and content-object checks.

use serde_json::{Map, Value};

use crate::types::CONTENT_TYPES;
use crate::{Error, Result};

/// Checks a single content object found at `path`.
pub fn check_content_object(item: &Value, path: &str) -> Result<()> {
    let obj = item
        .as_object()
        .ok_or_else(|| Error::validation(format!("{} must be a content object", path), path))?;

    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| CONTENT_TYPES.contains(t))
        .ok_or_else(|| {
            Error::validation(
                format!(
                    "{} has an invalid content type; expected one of {}",
                    path,
                    CONTENT_TYPES.join(", ")
                ),
                path,
            )
        })?;

    if kind == "text" {
        if !obj.get("text").map(Value::is_string).unwrap_or(false) {
            return Err(Error::validation(
                format!("{}.text must be a string", path),
                format!("{}.text", path),
            ));
        }
        return Ok(());
    }

    // url kinds: either a bare URL string or {"url": "..."}
    let url_ok = match obj.get(kind) {
        Some(Value::String(_)) => true,
        Some(Value::Object(m)) => m.get("url").map(Value::is_string).unwrap_or(false),
        _ => false,
    };
    if !url_ok {
        return Err(Error::validation(
            format!("{}.{} must be a URL string or an object with a url", path, kind),
            format!("{}.{}", path, kind),
        ));
    }
    Ok(())
}

fn check_content_list(value: &Value, path: &str) -> Result<()> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::validation(format!("{} must be an array", path), path))?;
    for (j, item) in items.iter().enumerate() {
        check_content_object(item, &format!("{}[{}]", path, j))?;
    }
    Ok(())
}

/// Entries are checked in order; within an entry `system`, then `user`, then `assistants`.
pub fn check_messages(body: &Map<String, Value>) -> Result<()> {
    let messages = body
        .get("messages")
        .and_then(Value::as_array)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| Error::validation("messages must be a non-empty array", "messages"))?;

    for (i, entry) in messages.iter().enumerate() {
        let path = format!("messages[{}]", i);
        let entry = entry
            .as_object()
            .ok_or_else(|| Error::validation(format!("{} must be an object", path), &path))?;

        let system = entry.get("system");
        let user = entry.get("user");
        let assistants = entry.get("assistants");
        if system.is_none() && user.is_none() && assistants.is_none() {
            return Err(Error::validation(
                format!("{} must contain at least one of system, user, assistants", path),
                path,
            ));
        }

        if let Some(system) = system {
            check_content_list(system, &format!("{}.system", path))?;
        }
        if let Some(user) = user {
            check_content_list(user, &format!("{}.user", path))?;
        }
        if let Some(assistants) = assistants {
            let assistants_path = format!("{}.assistants", path);
            let by_model = assistants.as_object().ok_or_else(|| {
                Error::validation(
                    format!(
                        "{} must be an object mapping model names to content arrays",
                        assistants_path
                    ),
                    &assistants_path,
                )
            })?;
            for (model, content) in by_model {
                check_content_list(content, &format!("{}.{}", assistants_path, model))?;
            }
        }
    }
    Ok(())
}
