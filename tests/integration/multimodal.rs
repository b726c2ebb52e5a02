//! Multipart uploads and file reference resolution

use crate::integration::mock_server::{MockServerFixture, TEST_API_KEY};
use modelhub_rust::files::FileResolver;
use modelhub_rust::types::{ImageEditRequest, TranscriptionRequest};
use modelhub_rust::{ErrorCode, ErrorKind, ModelHubClient};
use std::time::Duration;

#[tokio::test]
async fn test_speech_to_text_uploads_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("greeting.wav");
    std::fs::write(&path, b"RIFF-fake-wave-data").unwrap();

    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_multipart(
            "/v1/audio/transcriptions",
            &[
                r#"name="models"\r\n\r\nwhisper-1"#,
                r#"name="language"\r\n\r\nen"#,
                r#"name="file"; filename="greeting.wav""#,
                "RIFF-fake-wave-data",
            ],
            r#"{"text":"hello world"}"#,
        )
        .await;

    let client = fixture.create_test_client().unwrap();
    let request = TranscriptionRequest::new("whisper-1", path.to_str().unwrap()).with_language("en");
    let response = client.speech_to_text(&request).await.unwrap();
    assert_eq!(response["text"], "hello world");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_image_edit_downloads_remote_image() {
    let fixture = MockServerFixture::new().await;
    let download = fixture
        .mock_download("/assets/cat.png", b"PNG-bytes-of-a-cat".to_vec())
        .await;
    let upload = fixture
        .mock_multipart(
            "/v1/images/edits",
            &[
                r#"name="prompt"\r\n\r\nadd a hat"#,
                r#"name="image"; filename="cat.png""#,
                "PNG-bytes-of-a-cat",
            ],
            r#"{"data":[{"url":"https://cdn.example.com/edited.png"}]}"#,
        )
        .await;

    let client = fixture.create_test_client().unwrap();
    let request = ImageEditRequest::new(vec!["m1".into()], "add a hat", fixture.url("/assets/cat.png"));
    let response = client.image_edit(&request).await.unwrap();
    assert_eq!(response["data"][0]["url"], "https://cdn.example.com/edited.png");
    download.assert_async().await;
    upload.assert_async().await;
}

#[tokio::test]
async fn test_declared_oversized_download_is_rejected() {
    let scratch = tempfile::tempdir().unwrap();
    let fixture = MockServerFixture::new().await;
    let _download = fixture
        .mock_download("/assets/long.wav", vec![7u8; 4096])
        .await;
    let upload = fixture.mock_unreachable("/v1/audio/transcriptions").await;

    let resolver = FileResolver::new()
        .with_max_size(1024)
        .with_scratch_dir(scratch.path());
    let client = fixture.create_test_client_with_files(resolver).unwrap();

    let err = client
        .speech_to_text(&TranscriptionRequest::new("whisper-1", fixture.url("/assets/long.wav")))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::File);
    assert!(err.message().contains("exceeds the maximum size of 1024 bytes"));
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    upload.assert_async().await;
}

#[tokio::test]
async fn test_oversized_chunked_download_leaves_no_scratch_file() {
    let scratch = tempfile::tempdir().unwrap();
    let fixture = MockServerFixture::new().await;
    // 8 x 512 bytes with no Content-Length; the limit trips mid-stream
    let download = fixture.mock_chunked_download("/assets/stream.wav", 8, 512).await;
    let upload = fixture.mock_unreachable("/v1/audio/transcriptions").await;

    let resolver = FileResolver::new()
        .with_max_size(1024)
        .with_scratch_dir(scratch.path());
    let client = fixture.create_test_client_with_files(resolver).unwrap();

    let err = client
        .speech_to_text(&TranscriptionRequest::new("whisper-1", fixture.url("/assets/stream.wav")))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::File);
    assert!(err.message().contains("exceeds the maximum size of 1024 bytes"));
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    download.assert_async().await;
    upload.assert_async().await;
}

#[tokio::test]
async fn test_chunked_download_within_limit_is_uploaded() {
    let fixture = MockServerFixture::new().await;
    let _download = fixture.mock_chunked_download("/assets/short.wav", 2, 256).await;
    let upload = fixture
        .mock_multipart(
            "/v1/audio/transcriptions",
            &[r#"name="file"; filename="short.wav""#],
            r#"{"text":"ok"}"#,
        )
        .await;

    let resolver = FileResolver::new().with_max_size(1024);
    let client = fixture.create_test_client_with_files(resolver).unwrap();
    let response = client
        .speech_to_text(&TranscriptionRequest::new("whisper-1", fixture.url("/assets/short.wav")))
        .await
        .unwrap();
    assert_eq!(response["text"], "ok");
    upload.assert_async().await;
}

#[tokio::test]
async fn test_default_resolver_uses_client_timeout() {
    let fixture = MockServerFixture::new().await;
    let _download = fixture
        .mock_stalled_download("/assets/slow.wav", Duration::from_secs(3))
        .await;
    let upload = fixture.mock_unreachable("/v1/audio/transcriptions").await;

    let client = ModelHubClient::builder()
        .api_key(TEST_API_KEY)
        .base_url(&fixture.base_url)
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();
    let err = client
        .speech_to_text(&TranscriptionRequest::new("whisper-1", fixture.url("/assets/slow.wav")))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    upload.assert_async().await;
}

#[tokio::test]
async fn test_failed_download_is_file_error() {
    let fixture = MockServerFixture::new().await;
    let _missing = {
        let mut server = fixture.server.lock().await;
        server
            .mock("GET", "/assets/gone.mp3")
            .with_status(404)
            .create_async()
            .await
    };
    let upload = fixture.mock_unreachable("/v1/audio/transcriptions").await;

    let client = fixture.create_test_client().unwrap();
    let err = client
        .speech_to_text(&TranscriptionRequest::new("whisper-1", fixture.url("/assets/gone.mp3")))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::File);
    assert!(err.message().contains("HTTP 404"));
    upload.assert_async().await;
}
