//! Successful exchanges through the HTTP transport

use crate::integration::mock_server::MockServerFixture;
use modelhub_rust::types::{
    AudioGenerateRequest, ChatRequest, ContentItem, MessageEntry, SpeechRequest,
};
use serde_json::json;

#[tokio::test]
async fn test_chat_completion_round_trip() {
    let fixture = MockServerFixture::new().await;
    let body = r#"{"id":"cmpl-42","responses":{"gpt-4o":"Hi there","claude-3-5-sonnet":"Hello!"}}"#;
    let mock = fixture
        .mock_json_response("/v1/chat/completions", 200, body)
        .await;

    let client = fixture.create_test_client().unwrap();
    let request = ChatRequest::new(
        vec!["gpt-4o".into(), "claude-3-5-sonnet".into()],
        vec![
            MessageEntry::system(vec![ContentItem::text("Be brief.")]),
            MessageEntry::user_text("Hello, how are you?"),
        ],
    )
    .with_max_tokens(64);

    let response = client.chat_completions(&request).await.unwrap();
    assert_eq!(response["id"], "cmpl-42");
    assert_eq!(response["responses"]["gpt-4o"], "Hi there");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_body_is_sent_as_json() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/v1/audio/generations")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(json!({
                "models": ["m1"],
                "prompt": "hello",
                "duration": 12.5
            })))
            .with_status(200)
            .with_body(r#"{"audio":"https://cdn.example.com/a.mp3"}"#)
            .create_async()
            .await
    };

    let client = fixture.create_test_client().unwrap();
    let response = client
        .audio_generate(&AudioGenerateRequest::new(vec!["m1".into()], "hello").with_duration(12.5))
        .await
        .unwrap();
    assert_eq!(response, json!({"audio": "https://cdn.example.com/a.mp3"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_text_to_speech() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response("/v1/audio/speech", 200, r#"{"url":"https://cdn.example.com/s.mp3"}"#)
        .await;

    let client = fixture.create_test_client().unwrap();
    let response = client
        .text_to_speech(&SpeechRequest::new("tts-1", "Good morning").with_voice("alloy"))
        .await
        .unwrap();
    assert_eq!(response["url"], "https://cdn.example.com/s.mp3");
    mock.assert_async().await;
}
