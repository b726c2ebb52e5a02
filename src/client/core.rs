use serde_json::Value;
use std::sync::Arc;

use crate::files::FileResolver;
use crate::transport::Transport;
use crate::types::{
    AudioGenerateRequest, ChatRequest, ImageEditRequest, ImageGenerateRequest, RequestKind,
    SearchRequest, SpeechRequest, TranscriptionRequest, VideoEditRequest, VideoGenerateRequest,
};
use crate::Result;

/// Client for the ModelHub platform.
///
/// Each call validates its request synchronously, performs at most one
/// exchange through the configured [`Transport`], and returns the decoded
/// response body unchanged. Calls share no mutable state, so one client can
/// serve many concurrent callers.
#[derive(Clone)]
pub struct ModelHubClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) files: Arc<FileResolver>,
}

impl ModelHubClient {
    /// Client configured from the environment (see [`super::ModelHubClientBuilder`]).
    pub fn new() -> Result<Self> {
        super::ModelHubClientBuilder::new().build()
    }

    pub fn builder() -> super::ModelHubClientBuilder {
        super::ModelHubClientBuilder::new()
    }

    /// Creates a client around an existing transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            files: Arc::new(FileResolver::new()),
        }
    }

    pub async fn chat_completions(&self, request: &ChatRequest) -> Result<Value> {
        self.execute_typed(RequestKind::ChatCompletion, request).await
    }

    /// Fans the conversation out to every model and combines the answers.
    pub async fn combination(&self, request: &ChatRequest) -> Result<Value> {
        self.execute_typed(RequestKind::Combination, request).await
    }

    /// Side-by-side answers from every model. Only `models` is checked client-side.
    pub async fn comparison(&self, request: &ChatRequest) -> Result<Value> {
        self.execute_typed(RequestKind::Comparison, request).await
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<Value> {
        self.execute_typed(RequestKind::Search, request).await
    }

    pub async fn image_generate(&self, request: &ImageGenerateRequest) -> Result<Value> {
        self.execute_typed(RequestKind::ImageGenerate, request).await
    }

    /// Sends `image` (and `mask`, if set) as multipart file parts.
    pub async fn image_edit(&self, request: &ImageEditRequest) -> Result<Value> {
        self.execute_typed(RequestKind::ImageEdit, request).await
    }

    pub async fn audio_generate(&self, request: &AudioGenerateRequest) -> Result<Value> {
        self.execute_typed(RequestKind::AudioGenerate, request).await
    }

    pub async fn text_to_speech(&self, request: &SpeechRequest) -> Result<Value> {
        self.execute_typed(RequestKind::TextToSpeech, request).await
    }

    pub async fn speech_to_text(&self, request: &TranscriptionRequest) -> Result<Value> {
        self.execute_typed(RequestKind::SpeechToText, request).await
    }

    pub async fn video_generate(&self, request: &VideoGenerateRequest) -> Result<Value> {
        self.execute_typed(RequestKind::VideoGenerate, request).await
    }

    /// Only `models` is checked client-side.
    pub async fn video_edit(&self, request: &VideoEditRequest) -> Result<Value> {
        self.execute_typed(RequestKind::VideoEdit, request).await
    }

    /// Status lookup is not offered by the platform; always returns the stub response.
    pub async fn video_status(&self, id: &str) -> Result<Value> {
        self.execute(RequestKind::VideoStatus, serde_json::json!({ "id": id }))
            .await
    }
}
