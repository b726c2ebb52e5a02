//! Typed request models.
//!
//! Every request serializes to the JSON object the platform expects. The
//! validator runs on that JSON value, so raw [`serde_json::Value`] bodies and
//! the typed structs here go through exactly the same checks.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`message`] | Content items and chat-family message entries |
//! | [`request`] | One request struct per capability plus [`RequestKind`] |
//!
//! ## Example
//!
//! ```rust
//! use modelhub_rust::types::{ChatRequest, MessageEntry};
//!
//! let request = ChatRequest::new(vec!["gpt-4o".into()], vec![MessageEntry::user_text("Hello")])
//!     .with_temperature(0.2);
//! assert_eq!(request.models.len(), 1);
//! ```

pub mod message;
pub mod request;

pub use message::{ContentItem, MediaUrl, MessageEntry, CONTENT_TYPES};
pub use request::{
    AudioGenerateRequest, ChatRequest, ImageEditRequest, ImageGenerateRequest,
    RequestKind, SearchRequest, SpeechRequest, TranscriptionRequest, TypedRequest, VideoEditRequest,
    VideoGenerateRequest,
};
