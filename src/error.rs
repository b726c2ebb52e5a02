use crate::error_code::ErrorCode;
use serde_json::{json, Value};
use std::fmt;
use thiserror::Error;

/// Shared payload carried by every error kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    /// Human-readable message
    pub message: String,
    /// Machine-readable code
    pub code: ErrorCode,
    /// HTTP status, when the error came from a completed exchange
    pub status: Option<u16>,
    /// Structured details (e.g. `{"field": "messages[0]"}` or `{"message": .., "status": ..}`)
    pub details: Option<Value>,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code,
            status: None,
            details: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}", self.message, self.code)?;
        if let Some(status) = self.status {
            write!(f, ", HTTP {}", status)?;
        }
        f.write_str("]")
    }
}

/// Discriminant of [`Error`], handy for assertions and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Authentication,
    InvalidRequest,
    RateLimit,
    ServiceUnavailable,
    Connection,
    Api,
}

/// Closed error taxonomy for the client.
///
/// Validation errors are raised before any I/O. Every other kind comes out of
/// the error classifier after an exchange completed or failed. Nothing is
/// retried internally.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(ErrorPayload),

    #[error("Authentication error: {0}")]
    Authentication(ErrorPayload),

    #[error("Invalid request: {0}")]
    InvalidRequest(ErrorPayload),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(ErrorPayload),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(ErrorPayload),

    #[error("Connection error: {0}")]
    Connection(ErrorPayload),

    #[error("API error: {0}")]
    Api(ErrorPayload),
}

impl Error {
    /// Input validation failure naming the offending field path.
    pub fn validation(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Error::Validation(
            ErrorPayload::new(msg, ErrorCode::Validation)
                .with_details(json!({ "field": field.into() })),
        )
    }

    /// Client misconfiguration, surfaced as a validation-kind error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Validation(ErrorPayload::new(msg, ErrorCode::Configuration))
    }

    /// File reference rejected by the resolver.
    pub fn file(msg: impl Into<String>, reference: impl Into<String>) -> Self {
        Error::Validation(
            ErrorPayload::new(msg, ErrorCode::File)
                .with_details(json!({ "reference": reference.into() })),
        )
    }

    /// The exchange did not complete.
    pub fn connection(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        Error::Connection(
            ErrorPayload::new(format!("Connection failed: {}", msg), ErrorCode::Connection)
                .with_details(json!({ "message": msg })),
        )
    }

    /// Builds the typed error for a completed non-success exchange.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let code = ErrorCode::from_http_status(status);
        let payload = ErrorPayload::new(message.clone(), code)
            .with_status(status)
            .with_details(json!({ "message": message, "status": status }));
        match code {
            ErrorCode::InvalidRequest => Error::InvalidRequest(payload),
            ErrorCode::Authentication | ErrorCode::PermissionDenied => {
                Error::Authentication(payload)
            }
            ErrorCode::RateLimited => Error::RateLimit(payload),
            ErrorCode::ServiceError => Error::ServiceUnavailable(payload),
            _ => Error::Api(payload),
        }
    }

    /// 2xx response whose body could not be decoded.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        Error::Api(
            ErrorPayload::new(format!("Invalid response: {}", msg), ErrorCode::InvalidResponse)
                .with_details(json!({ "message": msg })),
        )
    }

    /// Catch-all wrapper for unrecognized failures; the original message is kept in details.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        Error::Api(
            ErrorPayload::new(format!("Unexpected error: {}", msg), ErrorCode::Unexpected)
                .with_details(json!({ "message": msg })),
        )
    }

    pub fn payload(&self) -> &ErrorPayload {
        match self {
            Error::Validation(p)
            | Error::Authentication(p)
            | Error::InvalidRequest(p)
            | Error::RateLimit(p)
            | Error::ServiceUnavailable(p)
            | Error::Connection(p)
            | Error::Api(p) => p,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::RateLimit(_) => ErrorKind::RateLimit,
            Error::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            Error::Connection(_) => ErrorKind::Connection,
            Error::Api(_) => ErrorKind::Api,
        }
    }

    pub fn message(&self) -> &str {
        &self.payload().message
    }

    pub fn code(&self) -> ErrorCode {
        self.payload().code
    }

    pub fn status(&self) -> Option<u16> {
        self.payload().status
    }

    pub fn details(&self) -> Option<&Value> {
        self.payload().details.as_ref()
    }

    /// Field path recorded by validation errors.
    pub fn field(&self) -> Option<&str> {
        self.details()
            .and_then(|d| d.get("field"))
            .and_then(|v| v.as_str())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::connection(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::unexpected(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::unexpected(e.to_string())
    }
}
