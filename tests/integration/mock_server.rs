//! Mock HTTP server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use modelhub_rust::files::FileResolver;
use modelhub_rust::transport::REQUEST_ID_HEADER;
use modelhub_rust::ModelHubClient;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TEST_API_KEY: &str = "test-key";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Create a test client pointed at the mock server
    pub fn create_test_client(&self) -> modelhub_rust::Result<ModelHubClient> {
        ModelHubClient::builder()
            .api_key(TEST_API_KEY)
            .base_url(&self.base_url)
            .build()
    }

    pub fn create_test_client_with_files(
        &self,
        resolver: FileResolver,
    ) -> modelhub_rust::Result<ModelHubClient> {
        ModelHubClient::builder()
            .api_key(TEST_API_KEY)
            .base_url(&self.base_url)
            .file_resolver(resolver)
            .build()
    }

    /// URL of a path served by this fixture
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create a mock for a JSON response; auth and request-id headers must be present
    pub async fn mock_json_response(&self, path: &str, status: u16, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", path)
            .match_header("authorization", format!("Bearer {}", TEST_API_KEY).as_str())
            .match_header(REQUEST_ID_HEADER, Matcher::Any)
            .with_status(status as usize)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Create a mock answering with a reverse-proxy style HTML page
    pub async fn mock_html_response(&self, path: &str, status: u16) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", path)
            .with_status(status as usize)
            .with_header("content-type", "text/html")
            .with_body("<!DOCTYPE html><html><head><title>Bad Gateway</title></head><body>nginx</body></html>")
            .create_async()
            .await
    }

    /// Create a mock that must never be hit
    pub async fn mock_unreachable(&self, path: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", path)
            .with_status(200)
            .with_body("{}")
            .expect(0)
            .create_async()
            .await
    }

    /// Create a mock multipart endpoint; every regex must match the body
    pub async fn mock_multipart(&self, path: &str, body_patterns: &[&str], response: &str) -> Mock {
        let matchers = body_patterns
            .iter()
            .map(|p| Matcher::Regex(p.to_string()))
            .collect();
        let mut server = self.server.lock().await;
        server
            .mock("POST", path)
            .match_header("content-type", Matcher::Regex("^multipart/form-data".to_string()))
            .match_body(Matcher::AllOf(matchers))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response)
            .create_async()
            .await
    }

    /// Serve a file for download
    /// Download served with chunked transfer encoding, so no length is declared up front
    pub async fn mock_chunked_download(&self, path: &str, chunks: usize, chunk_size: usize) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_chunked_body(move |w| {
                for _ in 0..chunks {
                    w.write_all(&vec![7u8; chunk_size])?;
                }
                Ok(())
            })
            .create_async()
            .await
    }

    /// Download that sends one chunk and then stalls for `stall`
    pub async fn mock_stalled_download(&self, path: &str, stall: std::time::Duration) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_chunked_body(move |w| {
                w.write_all(b"RIFF")?;
                w.flush()?;
                std::thread::sleep(stall);
                w.write_all(b"-rest-of-the-file")
            })
            .create_async()
            .await
    }

    pub async fn mock_download(&self, path: &str, bytes: Vec<u8>) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body(bytes)
            .create_async()
            .await
    }
}
