//! Transport seam between the client and the network.
//!
//! A [`Transport`] performs exactly one exchange per call and hands back the
//! raw status and body. It never interprets the body; classification happens
//! in [`crate::client::error_classification`].

mod http;

pub use http::{build_http_client, HttpConfig, HttpTransport, REQUEST_ID_HEADER};

use async_trait::async_trait;
use serde_json::Value;

use crate::files::ResolvedFile;
use crate::Result;

/// Status and undecoded body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    Network(String),

    /// An already-typed error; passed through without reclassification.
    #[error("{0}")]
    Typed(crate::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a JSON body to `endpoint` (a path relative to the base URL).
    async fn send(&self, endpoint: &str, body: &Value) -> std::result::Result<RawResponse, TransportError>;

    /// Sends a multipart body to `endpoint`.
    async fn send_multipart(
        &self,
        endpoint: &str,
        body: MultipartBody,
    ) -> std::result::Result<RawResponse, TransportError>;
}

/// A named file part of a [`MultipartBody`].
#[derive(Debug, Clone)]
pub struct FilePart {
    pub name: String,
    pub file: ResolvedFile,
}

/// Multipart body built per request and handed to the transport by value.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: ResolvedFile) -> Self {
        self.files.push(FilePart {
            name: name.into(),
            file,
        });
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    /// Text value of the first field with this name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn into_form(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for part in self.files {
            let file_part = reqwest::multipart::Part::bytes(part.file.bytes.to_vec())
                .file_name(part.file.filename)
                .mime_str(&part.file.mime)
                .map_err(|e| crate::Error::unexpected(format!("Invalid mime: {}", e)))?;
            form = form.part(part.name, file_part);
        }
        Ok(form)
    }
}
