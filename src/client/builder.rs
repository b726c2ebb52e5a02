use keyring::Entry;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::client::core::ModelHubClient;
use crate::files::FileResolver;
use crate::transport::{build_http_client, HttpConfig, HttpTransport, Transport};
use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.modelhub.ai";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const KEYRING_SERVICE: &str = "modelhub";
const KEYRING_USER: &str = "api_key";

/// Builder for creating clients with custom configuration.
///
/// Unset values fall back to the environment:
/// - `MODELHUB_API_KEY` (after the OS keyring entry `modelhub`/`api_key`)
/// - `MODELHUB_BASE_URL`
/// - `MODELHUB_HTTP_TIMEOUT_SECS`
/// - `MODELHUB_PROXY_URL`
#[derive(Default)]
pub struct ModelHubClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    proxy_url: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    file_resolver: Option<FileResolver>,
}

impl ModelHubClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override base URL (also used to point tests at a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Whole-exchange timeout. An expired timeout surfaces as a connection error.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    /// Use a custom transport instead of the HTTP one. API key and URL settings are ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn file_resolver(mut self, resolver: FileResolver) -> Self {
        self.file_resolver = Some(resolver);
        self
    }

    pub fn build(self) -> Result<ModelHubClient> {
        let timeout = Self::resolve_timeout(self.timeout);
        let proxy_url = Self::resolve_proxy(self.proxy_url);

        let files = match self.file_resolver {
            Some(resolver) => resolver,
            None => FileResolver::new().with_http_client(build_http_client(timeout, proxy_url.as_deref())?),
        };
        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(Self::http_config(
                self.api_key,
                self.base_url,
                Some(timeout),
                proxy_url,
            )?)?),
        };
        Ok(ModelHubClient {
            transport,
            files: Arc::new(files),
        })
    }

    fn http_config(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
        proxy_url: Option<String>,
    ) -> Result<HttpConfig> {
        // blank values at any source fall through to the next one
        let api_key = non_blank(api_key)
            .or_else(|| non_blank(Self::keyring_api_key()))
            .or_else(|| non_blank(env::var("MODELHUB_API_KEY").ok()))
            .ok_or_else(|| {
                Error::configuration("API key required: set MODELHUB_API_KEY or call api_key()")
            })?;

        let base_url = base_url
            .or_else(|| env::var("MODELHUB_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = url::Url::parse(&base_url)
            .map_err(|e| Error::configuration(format!("Invalid base URL {}: {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::configuration(format!(
                "Invalid base URL {}: scheme must be http or https",
                base_url
            )));
        }

        Ok(HttpConfig {
            base_url,
            api_key,
            timeout: Self::resolve_timeout(timeout),
            proxy_url: Self::resolve_proxy(proxy_url),
        })
    }

    fn resolve_timeout(timeout: Option<Duration>) -> Duration {
        timeout.unwrap_or_else(|| {
            Duration::from_secs(
                env::var("MODELHUB_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            )
        })
    }

    fn resolve_proxy(proxy_url: Option<String>) -> Option<String> {
        proxy_url.or_else(|| env::var("MODELHUB_PROXY_URL").ok())
    }

    fn keyring_api_key() -> Option<String> {
        Entry::new(KEYRING_SERVICE, KEYRING_USER)
            .ok()
            .and_then(|entry| entry.get_password().ok())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
