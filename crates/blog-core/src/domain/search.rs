use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Post;

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Search criteria for posts. All filters are optional and combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSearchInfo {
    /// Single tag that must appear in the post's tags. Blank means no tag filter.
    pub tag: Option<String>,
    /// Inclusive lower bound on creation time.
    pub from_created_at: Option<DateTime<Utc>>,
    /// Exclusive upper bound on creation time.
    pub to_created_at: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

impl PostSearchInfo {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn created_between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from_created_at = Some(from);
        self.to_created_at = Some(to);
        self
    }

    pub fn page(mut self, limit: u32, offset: u64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }

    pub fn effective_offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostsList {
    pub posts: Vec<Post>,
    /// Number of matching posts, ignoring limit and offset.
    pub total: u64,
}

impl PostsList {
    pub fn empty() -> Self {
        Self::default()
    }
}
