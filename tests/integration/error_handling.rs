//! Integration tests for error classification over HTTP

use crate::integration::mock_server::MockServerFixture;
use modelhub_rust::types::{ChatRequest, ImageGenerateRequest, MessageEntry, SearchRequest};
use modelhub_rust::{Error, ErrorCode, ErrorKind, ModelHubClient};
use std::time::Duration;

fn chat() -> ChatRequest {
    ChatRequest::new(vec!["gpt-4o".into()], vec![MessageEntry::user_text("Hi")])
}

#[tokio::test]
async fn test_bad_request_message_is_surfaced() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response("/v1/chat/completions", 400, r#"{"message":"bad field"}"#)
        .await;

    let client = fixture.create_test_client().unwrap();
    let err = client.chat_completions(&chat()).await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
    assert_eq!(err.message(), "bad field");
    assert_eq!(err.code().to_string(), "INVALID_REQUEST");
    assert_eq!(err.status(), Some(400));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_status_kinds() {
    let cases = [
        (401, r#"{"error":"invalid api key"}"#, ErrorKind::Authentication, "AUTH_ERROR"),
        (403, r#"{"message":"forbidden"}"#, ErrorKind::Authentication, "PERMISSION_DENIED"),
        (404, r#"{"message":"no such route"}"#, ErrorKind::Api, "RESOURCE_NOT_FOUND"),
        (429, r#"{"message":"slow down"}"#, ErrorKind::RateLimit, "RATE_LIMIT"),
        (503, r#"{"message":"maintenance"}"#, ErrorKind::ServiceUnavailable, "SERVICE_ERROR"),
        (409, r#"{"message":"conflict"}"#, ErrorKind::Api, "API_ERROR_409"),
    ];

    for (status, body, kind, code) in cases {
        let fixture = MockServerFixture::new().await;
        let mock = fixture.mock_json_response("/v1/search", status, body).await;
        let client = fixture.create_test_client().unwrap();

        let err = client
            .search(&SearchRequest::new(vec!["m1".into()], "rust"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), kind, "status {}", status);
        assert_eq!(err.code().to_string(), code, "status {}", status);
        assert_eq!(err.status(), Some(status));
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_html_error_page_uses_fallback_message() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_html_response("/v1/chat/completions", 502).await;

    let client = fixture.create_test_client().unwrap();
    let err = client.chat_completions(&chat()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    assert_eq!(
        err.message(),
        "Server responded with unknown format. Please try again later."
    );
    assert_eq!(err.status(), Some(502));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/v1/images/generations")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await
    };

    let client = fixture.create_test_client().unwrap();
    let err = client
        .image_generate(&ImageGenerateRequest::new(vec!["m1".into()], "a cat"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.code(), ErrorCode::InvalidResponse);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable("/v1/images/generations").await;

    let client = fixture.create_test_client().unwrap();
    let err = client
        .image_generate(&ImageGenerateRequest::new(vec!["m1".into()], "a cat").with_dimensions(512, 10))
        .await
        .unwrap_err();
    assert_eq!(err.field(), Some("height"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then release a port so nothing is listening on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = ModelHubClient::builder()
        .api_key("test-key")
        .base_url(format!("http://127.0.0.1:{}", port))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let err = client.chat_completions(&chat()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert_eq!(err.code().to_string(), "CONNECTION_ERROR");
    assert_eq!(err.status(), None);
    assert!(err.message().starts_with("Connection failed: "));
}

#[tokio::test]
async fn test_missing_api_key_is_configuration_error() {
    // a blank key is skipped, so nothing else may supply one
    std::env::remove_var("MODELHUB_API_KEY");
    let err = ModelHubClient::builder()
        .api_key("   ")
        .base_url("http://127.0.0.1:1")
        .build()
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.code(), ErrorCode::Configuration);
}
