use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    Reporter,
    Manager,
    System,
}

impl Author {
    /// Prefix used when minting message ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Author::Reporter => "rep",
            Author::Manager => "mgr",
            Author::System => "sys",
        }
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Author::Reporter => "reporter",
            Author::Manager => "manager",
            Author::System => "system",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Anything that does not declare itself as video is shown as an image.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.trim_start().starts_with("video") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// Reference to media stored outside the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub url: String,
    pub content_type: String,
}

impl MediaRef {
    pub fn new(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content_type: content_type.into(),
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_content_type(&self.content_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttachment {
    pub url: String,
    pub kind: MediaKind,
}

impl From<MediaRef> for MediaAttachment {
    fn from(media: MediaRef) -> Self {
        let kind = media.kind();
        Self {
            url: media.url,
            kind,
        }
    }
}

/// One entry of a report conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub author: Author,
    pub name: Option<String>,
    pub text: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub media: Option<MediaAttachment>,
}

impl Message {
    pub fn is_system(&self) -> bool {
        self.author == Author::System
    }
}
