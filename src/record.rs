//! Content record with editor auto-detect
//!
//! A [`ContentRecord`] is the `{content, contentType}` pair stored with a
//! knowledge-base document or Forge resource. While auto-detect is on, every
//! edit re-classifies the content and overwrites the declared type when the
//! classifier disagrees. Choosing a type by hand switches auto-detect off
//! until it is explicitly re-enabled.

use crate::content_type::{ContentType, classify};
use serde::{Deserialize, Serialize};

fn auto_detect_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    content: String,
    content_type: ContentType,
    #[serde(skip, default = "auto_detect_default")]
    auto_detect: bool,
}

impl ContentRecord {
    /// Record with the type detected from `content`, auto-detect on
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let content_type = classify(&content);
        Self {
            content,
            content_type,
            auto_detect: true,
        }
    }

    /// Record with an explicitly declared type, auto-detect off
    pub fn with_type(content: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            content: content.into(),
            content_type,
            auto_detect: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn is_auto_detect(&self) -> bool {
        self.auto_detect
    }

    /// True when the content is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Replace the content, re-classifying when auto-detect is on
    ///
    /// Returns the new type if the edit changed it.
    pub fn edit(&mut self, content: impl Into<String>) -> Option<ContentType> {
        self.content = content.into();
        if !self.auto_detect {
            return None;
        }
        self.apply_detected()
    }

    /// Classify the current content now, regardless of the auto-detect flag
    pub fn detect_now(&mut self) -> ContentType {
        self.apply_detected();
        self.content_type
    }

    /// Declare the type by hand; turns auto-detect off
    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.content_type = content_type;
        self.auto_detect = false;
    }

    /// Turn auto-detect back on and re-classify the current content
    pub fn enable_auto_detect(&mut self) -> Option<ContentType> {
        self.auto_detect = true;
        self.apply_detected()
    }

    fn apply_detected(&mut self) -> Option<ContentType> {
        let detected = classify(&self.content);
        if detected == self.content_type {
            return None;
        }
        tracing::debug!(
            from = %self.content_type,
            to = %detected,
            "Content type re-detected"
        );
        self.content_type = detected;
        Some(detected)
    }
}

impl Default for ContentRecord {
    fn default() -> Self {
        Self {
            content: String::new(),
            content_type: ContentType::Markdown,
            auto_detect: true,
        }
    }
}
