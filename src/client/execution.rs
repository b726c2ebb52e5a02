//! Request execution: validate, one exchange, classify.

use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::core::ModelHubClient;
use super::error_classification::{classify_response, classify_transport_error, decode_success};
use crate::files::MediaKind;
use crate::transport::{MultipartBody, RawResponse, TransportError};
use crate::types::{RequestKind, TypedRequest};
use crate::validation::{validate, validate_request};
use crate::{Error, Result};

/// Body returned for video status lookups.
pub fn video_status_unavailable() -> Value {
    json!({
        "status": "not_available",
        "message": "Video status lookup is not available for this platform"
    })
}

impl ModelHubClient {
    /// Validates and sends a raw JSON body of the given kind.
    ///
    /// File fields of multipart kinds hold file references and are resolved
    /// before sending.
    pub async fn execute(&self, kind: RequestKind, body: Value) -> Result<Value> {
        if let Err(err) = validate(kind, &body) {
            return Err(Self::rejected(kind, err));
        }
        self.dispatch(kind, body).await
    }

    pub(crate) async fn execute_typed<T: TypedRequest>(&self, kind: RequestKind, request: &T) -> Result<Value> {
        let body = validate_request(kind, request).map_err(|err| Self::rejected(kind, err))?;
        self.dispatch(kind, body).await
    }

    fn rejected(kind: RequestKind, err: Error) -> Error {
        debug!(
            operation = kind.as_str(),
            field = err.field().unwrap_or(""),
            "request rejected by validation"
        );
        err
    }

    /// Sends an already validated body.
    async fn dispatch(&self, kind: RequestKind, body: Value) -> Result<Value> {
        let Some(endpoint) = kind.endpoint() else {
            return Ok(video_status_unavailable());
        };

        let start = Instant::now();
        let outcome = if kind.is_multipart() {
            let form = self.build_multipart(kind, &body).await?;
            self.transport.send_multipart(endpoint, form).await
        } else {
            self.transport.send(endpoint, &body).await
        };
        Self::finish(kind, endpoint, start, outcome)
    }

    async fn build_multipart(&self, kind: RequestKind, body: &Value) -> Result<MultipartBody> {
        let mut form = MultipartBody::new();
        let Some(obj) = body.as_object() else {
            return Ok(form);
        };
        let file_fields = kind.file_fields();
        for (name, value) in obj {
            if value.is_null() {
                continue;
            }
            if file_fields.contains(&name.as_str()) {
                let reference = value.as_str().ok_or_else(|| {
                    Error::validation(format!("{} must be a file path or URL", name), name)
                })?;
                let file = self.files.resolve(reference, media_kind_for(kind)).await?;
                form = form.file(name.clone(), file);
                continue;
            }
            match value {
                Value::Array(items) => {
                    for item in items {
                        form = form.text(name.clone(), text_value(item));
                    }
                }
                other => form = form.text(name.clone(), text_value(other)),
            }
        }
        Ok(form)
    }

    fn finish(
        kind: RequestKind,
        endpoint: &str,
        start: Instant,
        outcome: std::result::Result<RawResponse, TransportError>,
    ) -> Result<Value> {
        let duration_ms = start.elapsed().as_millis() as u64;
        let result = match outcome {
            Err(e) => Err(classify_transport_error(e)),
            Ok(raw) if raw.is_success() => decode_success(&raw.body),
            Ok(raw) => Err(classify_response(raw.status, &raw.body)),
        };

        match &result {
            Ok(_) => info!(
                operation = kind.as_str(),
                endpoint,
                duration_ms,
                "modelhub request completed"
            ),
            Err(err) => warn!(
                operation = kind.as_str(),
                endpoint,
                http_status = err.status().unwrap_or(0),
                error_code = %err.code(),
                duration_ms,
                "modelhub request failed: {}",
                err.message()
            ),
        }
        result
    }
}

fn media_kind_for(kind: RequestKind) -> MediaKind {
    match kind {
        RequestKind::SpeechToText => MediaKind::Audio,
        _ => MediaKind::Image,
    }
}

fn text_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
