//! Per-capability request structs.
//!
//! Optional fields are skipped when unset so the platform applies its own
//! defaults, and the validator only inspects fields that are present.

use serde::{Deserialize, Serialize};

use super::message::MessageEntry;

/// The fixed set of operation shapes the platform exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    ChatCompletion,
    Combination,
    Comparison,
    Search,
    ImageGenerate,
    ImageEdit,
    AudioGenerate,
    TextToSpeech,
    SpeechToText,
    VideoGenerate,
    VideoEdit,
    VideoStatus,
}

impl RequestKind {
    pub const ALL: [RequestKind; 12] = [
        RequestKind::ChatCompletion,
        RequestKind::Combination,
        RequestKind::Comparison,
        RequestKind::Search,
        RequestKind::ImageGenerate,
        RequestKind::ImageEdit,
        RequestKind::AudioGenerate,
        RequestKind::TextToSpeech,
        RequestKind::SpeechToText,
        RequestKind::VideoGenerate,
        RequestKind::VideoEdit,
        RequestKind::VideoStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChatCompletion => "chat_completion",
            Self::Combination => "combination",
            Self::Comparison => "comparison",
            Self::Search => "search",
            Self::ImageGenerate => "image_generate",
            Self::ImageEdit => "image_edit",
            Self::AudioGenerate => "audio_generate",
            Self::TextToSpeech => "text_to_speech",
            Self::SpeechToText => "speech_to_text",
            Self::VideoGenerate => "video_generate",
            Self::VideoEdit => "video_edit",
            Self::VideoStatus => "video_status",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    /// Human-readable operation name used in error messages.
    pub fn operation_name(&self) -> &'static str {
        match self {
            Self::ChatCompletion => "chat completion",
            Self::Combination => "combination",
            Self::Comparison => "comparison",
            Self::Search => "search",
            Self::ImageGenerate => "image generation",
            Self::ImageEdit => "image edit",
            Self::AudioGenerate => "audio generation",
            Self::TextToSpeech => "text-to-speech",
            Self::SpeechToText => "speech-to-text",
            Self::VideoGenerate => "video generation",
            Self::VideoEdit => "video edit",
            Self::VideoStatus => "video status",
        }
    }

    /// Endpoint path relative to the base URL. `VideoStatus` has none.
    pub fn endpoint(&self) -> Option<&'static str> {
        let path = match self {
            Self::ChatCompletion => "/v1/chat/completions",
            Self::Combination => "/v1/chat/combination",
            Self::Comparison => "/v1/chat/comparison",
            Self::Search => "/v1/search",
            Self::ImageGenerate => "/v1/images/generations",
            Self::ImageEdit => "/v1/images/edits",
            Self::AudioGenerate => "/v1/audio/generations",
            Self::TextToSpeech => "/v1/audio/speech",
            Self::SpeechToText => "/v1/audio/transcriptions",
            Self::VideoGenerate => "/v1/video/generations",
            Self::VideoEdit => "/v1/video/edits",
            Self::VideoStatus => return None,
        };
        Some(path)
    }

    /// Fields holding file references that are attached as multipart file parts.
    pub fn file_fields(&self) -> &'static [&'static str] {
        match self {
            Self::ImageEdit => &["image", "mask"],
            Self::SpeechToText => &["file"],
            _ => &[],
        }
    }

    pub fn is_multipart(&self) -> bool {
        !self.file_fields().is_empty()
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed request body.
///
/// serde_json writes a non-finite `f64` as `null`, which the validator reads
/// as "unset". `float_fields` lists the float fields that are set so they can
/// be checked for finiteness before the body is built.
pub trait TypedRequest: Serialize {
    fn float_fields(&self) -> Vec<(&'static str, f64)> {
        Vec::new()
    }
}

fn set_floats<const N: usize>(fields: [(&'static str, Option<f64>); N]) -> Vec<(&'static str, f64)> {
    fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
}

/// Chat completion, combination and comparison share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub models: Vec<String>,
    pub messages: Vec<MessageEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
}

impl ChatRequest {
    pub fn new(models: Vec<String>, messages: Vec<MessageEntry>) -> Self {
        Self {
            models,
            messages,
            temperature: None,
            top_p: None,
            max_tokens: None,
            frequency_penalty: None,
            presence_penalty: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_penalties(mut self, frequency: f64, presence: f64) -> Self {
        self.frequency_penalty = Some(frequency);
        self.presence_penalty = Some(presence);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub models: Vec<String>,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl SearchRequest {
    pub fn new(models: Vec<String>, query: impl Into<String>) -> Self {
        Self {
            models,
            query: query.into(),
            max_results: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerateRequest {
    pub models: Vec<String>,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
}

impl ImageGenerateRequest {
    pub fn new(models: Vec<String>, prompt: impl Into<String>) -> Self {
        Self {
            models,
            prompt: prompt.into(),
            n: None,
            width: None,
            height: None,
            seed: None,
            aspect_ratio: None,
            size: None,
            negative_prompt: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_count(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(ratio.into());
        self
    }
}

/// Image edit. `image` and `mask` are file references (local path or URL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEditRequest {
    pub models: Vec<String>,
    pub prompt: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl ImageEditRequest {
    pub fn new(models: Vec<String>, prompt: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            models,
            prompt: prompt.into(),
            image: image.into(),
            mask: None,
            n: None,
            width: None,
            height: None,
            seed: None,
            size: None,
        }
    }

    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioGenerateRequest {
    pub models: Vec<String>,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

impl AudioGenerateRequest {
    pub fn new(models: Vec<String>, prompt: impl Into<String>) -> Self {
        Self {
            models,
            prompt: prompt.into(),
            duration: None,
            seed: None,
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }
}

/// Text-to-speech. Exactly one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub models: Vec<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl SpeechRequest {
    pub fn new(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            models: vec![model.into()],
            text: text.into(),
            voice: None,
            speed: None,
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}

/// Speech-to-text. Exactly one model; `file` is a local path or URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionRequest {
    pub models: Vec<String>,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl TranscriptionRequest {
    pub fn new(model: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            models: vec![model.into()],
            file: file.into(),
            language: None,
            prompt: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoGenerateRequest {
    pub models: Vec<String>,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

impl VideoGenerateRequest {
    pub fn new(models: Vec<String>, prompt: impl Into<String>) -> Self {
        Self {
            models,
            prompt: prompt.into(),
            duration: None,
            fps: None,
            aspect_ratio: None,
            resolution: None,
            seed: None,
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }

    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEditRequest {
    pub models: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// URL of the source video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl TypedRequest for ChatRequest {
    fn float_fields(&self) -> Vec<(&'static str, f64)> {
        set_floats([
            ("temperature", self.temperature),
            ("top_p", self.top_p),
            ("frequency_penalty", self.frequency_penalty),
            ("presence_penalty", self.presence_penalty),
        ])
    }
}

impl TypedRequest for SearchRequest {}
impl TypedRequest for ImageGenerateRequest {}
impl TypedRequest for ImageEditRequest {}
impl TypedRequest for TranscriptionRequest {}
impl TypedRequest for VideoEditRequest {}

impl TypedRequest for AudioGenerateRequest {
    fn float_fields(&self) -> Vec<(&'static str, f64)> {
        set_floats([("duration", self.duration)])
    }
}

impl TypedRequest for SpeechRequest {
    fn float_fields(&self) -> Vec<(&'static str, f64)> {
        set_floats([("speed", self.speed)])
    }
}

impl TypedRequest for VideoGenerateRequest {
    fn float_fields(&self) -> Vec<(&'static str, f64)> {
        set_floats([("duration", self.duration), ("fps", self.fps)])
    }
}
