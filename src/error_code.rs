//! Machine-readable error codes.
//!
//! Every [`crate::Error`] carries exactly one [`ErrorCode`]. The string form
//! (via [`std::fmt::Display`]) is what callers branch on and what gets logged.
//!
//! ## HTTP status table
//!
//! | Status          | Code                 |
//! |-----------------|----------------------|
//! | 400             | `INVALID_REQUEST`    |
//! | 401             | `AUTH_ERROR`         |
//! | 403             | `PERMISSION_DENIED`  |
//! | 404             | `RESOURCE_NOT_FOUND` |
//! | 429             | `RATE_LIMIT`         |
//! | 500/502/503/504 | `SERVICE_ERROR`      |
//! | other           | `API_ERROR_{status}` |
//!
//! ## Example
//!
//! ```rust
//! use modelhub_rust::error_code::ErrorCode;
//!
//! assert_eq!(ErrorCode::from_http_status(429).to_string(), "RATE_LIMIT");
//! assert_eq!(ErrorCode::from_http_status(418).to_string(), "API_ERROR_418");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Caller input rejected before any network call
    Validation,
    /// Client misconfiguration (missing API key, bad base URL)
    Configuration,
    /// A file reference could not be resolved or violates size/extension limits
    File,
    /// HTTP 400
    InvalidRequest,
    /// HTTP 401
    Authentication,
    /// HTTP 403
    PermissionDenied,
    /// HTTP 404
    NotFound,
    /// HTTP 429
    RateLimited,
    /// HTTP 500, 502, 503, 504
    ServiceError,
    /// The exchange never completed
    Connection,
    /// 2xx response whose body could not be decoded
    InvalidResponse,
    /// Catch-all for errors that are neither typed nor network-level
    Unexpected,
    /// Any other non-success HTTP status
    Api(u16),
}

impl ErrorCode {
    fn static_str(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Configuration => "CONFIGURATION_ERROR",
            Self::File => "FILE_ERROR",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::Authentication => "AUTH_ERROR",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::NotFound => "RESOURCE_NOT_FOUND",
            Self::RateLimited => "RATE_LIMIT",
            Self::ServiceError => "SERVICE_ERROR",
            Self::Connection => "CONNECTION_ERROR",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::Unexpected => "UNEXPECTED_ERROR",
            Self::Api(_) => "API_ERROR",
        }
    }

    /// Maps an HTTP status code to its code. Total: unknown statuses map to [`ErrorCode::Api`].
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500 | 502 | 503 | 504 => Self::ServiceError,
            other => Self::Api(other),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(status) => write!(f, "API_ERROR_{}", status),
            other => f.write_str(other.static_str()),
        }
    }
}
