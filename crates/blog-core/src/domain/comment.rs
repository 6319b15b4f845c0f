use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment embedded in a post. Addressed only by its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment stamped with the current server time.
    pub fn new(info: CommentCreateInfo) -> Self {
        Self {
            username: info.username,
            text: info.text,
            created_at: Utc::now(),
        }
    }
}

/// Input for appending a comment to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentCreateInfo {
    pub username: String,
    pub text: String,
}

impl CommentCreateInfo {
    pub fn new(username: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
        }
    }
}
