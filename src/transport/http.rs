use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};
use reqwest::Proxy;
use tracing::debug;
use uuid::Uuid;

use super::{MultipartBody, RawResponse, Transport, TransportError};
use crate::{Error, Result};

/// Correlation id attached to every outgoing request.
pub const REQUEST_ID_HEADER: &str = "x-modelhub-request-id";

/// Resolved connection settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub proxy_url: Option<String>,
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// reqwest client with the configured timeout and optional proxy.
///
/// Shared by [`HttpTransport`] and the default file resolver, so remote file
/// downloads honour the same settings as platform calls.
pub fn build_http_client(timeout: Duration, proxy_url: Option<&str>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(90)));

    if let Some(proxy_url) = proxy_url {
        let proxy = Proxy::all(proxy_url)
            .map_err(|e| Error::configuration(format!("Invalid proxy URL {}: {}", proxy_url, e)))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = build_http_client(config.timeout, config.proxy_url.as_deref())?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    async fn execute(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<RawResponse, TransportError> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        debug!(endpoint, request_id = request_id.as_str(), "modelhub request start");

        let resp = request
            .bearer_auth(&self.api_key)
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await?;

        let status = resp.status().as_u16();
        // A body that cannot be read is a broken exchange, not a bad response.
        let body = resp.text().await?;

        debug!(
            endpoint,
            request_id = request_id.as_str(),
            http_status = status,
            duration_ms = start.elapsed().as_millis() as u64,
            "modelhub request finished"
        );
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: &str, body: &Value) -> std::result::Result<RawResponse, TransportError> {
        let request = self.client.post(self.url(endpoint)).json(body);
        self.execute(endpoint, request).await
    }

    async fn send_multipart(
        &self,
        endpoint: &str,
        body: MultipartBody,
    ) -> std::result::Result<RawResponse, TransportError> {
        let form = body.into_form().map_err(TransportError::Typed)?;
        let request = self.client.post(self.url(endpoint)).multipart(form);
        self.execute(endpoint, request).await
    }
}
