//! Post types

use crate::{BlogError, Result};
use serde::Deserialize;

/// Notice shown when a post is submitted without a title
pub const TITLE_REQUIRED: &str = "Title is required!";

/// A stored blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Create/edit form payload, as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// A draft whose title has been checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    title: String,
    content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Check the title is present. Content is free text and is never checked.
    pub fn validate(self) -> Result<ValidDraft> {
        if self.title.is_empty() {
            return Err(BlogError::Validation(TITLE_REQUIRED.to_string()));
        }
        Ok(ValidDraft {
            title: self.title,
            content: self.content,
        })
    }
}

impl ValidDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
