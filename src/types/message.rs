//! Chat-family message entries and content items.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allowed values of a content item's `type` discriminant.
pub const CONTENT_TYPES: &[&str] = &["text", "audio_url", "image_url", "video_url"];

/// A single typed unit of message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Text { text: String },
    AudioUrl { audio_url: MediaUrl },
    ImageUrl { image_url: MediaUrl },
    VideoUrl { video_url: MediaUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaUrl {
    pub url: String,
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        ContentItem::Text { text: text.into() }
    }

    pub fn audio_url(url: impl Into<String>) -> Self {
        ContentItem::AudioUrl {
            audio_url: MediaUrl { url: url.into() },
        }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentItem::ImageUrl {
            image_url: MediaUrl { url: url.into() },
        }
    }

    pub fn video_url(url: impl Into<String>) -> Self {
        ContentItem::VideoUrl {
            video_url: MediaUrl { url: url.into() },
        }
    }
}

/// One entry of a chat-family `messages` list.
///
/// At least one of `system`, `user` or `assistants` must be set; `assistants`
/// maps a model identifier to the content that model previously produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<Vec<ContentItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Vec<ContentItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistants: Option<BTreeMap<String, Vec<ContentItem>>>,
}

impl MessageEntry {
    pub fn system(content: Vec<ContentItem>) -> Self {
        Self {
            system: Some(content),
            ..Default::default()
        }
    }

    pub fn user(content: Vec<ContentItem>) -> Self {
        Self {
            user: Some(content),
            ..Default::default()
        }
    }

    /// Shorthand for a user entry holding a single text item.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![ContentItem::text(text)])
    }

    pub fn with_assistant(mut self, model: impl Into<String>, content: Vec<ContentItem>) -> Self {
        self.assistants
            .get_or_insert_with(BTreeMap::new)
            .insert(model.into(), content);
        self
    }
}
