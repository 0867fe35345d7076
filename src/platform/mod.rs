//! Review platform access.
//!
//! The downloader only needs three calls, so the platform is a small trait.
//! `OpenReviewClient` talks to the real service; tests supply canned data.

pub mod download;
pub mod openreview;

pub use download::*;
pub use openreview::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// One submission as stored in the metadata store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumMetadata {
    pub forum: String,
    pub submission_content: Value,
}

impl ForumMetadata {
    /// String content field, bare or wrapped as `{"value": ...}`
    pub fn content_str(&self, field: &str) -> Option<&str> {
        let value = self.submission_content.get(field)?;
        value
            .as_str()
            .or_else(|| value.get("value").and_then(Value::as_str))
    }

    pub fn venue(&self) -> Option<&str> {
        self.content_str("venue")
    }

    pub fn title(&self) -> Option<&str> {
        self.content_str("title")
    }
}

pub trait ReviewPlatform {
    /// All notes posted under `invitation`, in platform order
    fn fetch_metadata(&self, invitation: &str) -> Result<Vec<ForumMetadata>>;

    fn fetch_pdf(&self, forum_id: &str) -> Result<Vec<u8>>;

    /// Named attachment of a forum; `None` when the forum has none
    fn fetch_attachment(&self, forum_id: &str, field: &str) -> Result<Option<Vec<u8>>>;
}
