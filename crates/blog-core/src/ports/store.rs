use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Comment, Post};
use crate::error::RepoError;

/// Conjunctive filter over posts. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    /// Post must carry this tag.
    pub tag: Option<String>,
    /// `created_at >= created_from`
    pub created_from: Option<DateTime<Utc>>,
    /// `created_at < created_before`
    pub created_before: Option<DateTime<Utc>>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.tag.as_deref().is_none_or(|tag| post.has_tag(tag))
            && self.created_from.is_none_or(|from| post.created_at >= from)
            && self.created_before.is_none_or(|to| post.created_at < to)
    }
}

/// Field values to set in a single atomic update. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub text: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none() && self.tags.is_none()
    }
}

/// Document store holding one document per post, comments embedded.
///
/// Every mutating primitive must be atomic for a single document and
/// report how many documents it matched.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// Matching posts in store-native order, after skipping `skip` and taking at most `limit`.
    async fn find(&self, filter: &PostFilter, skip: u64, limit: u32) -> Result<Vec<Post>, RepoError>;

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    async fn insert_one(&self, post: &Post) -> Result<(), RepoError>;

    /// Set all present fields of `changes` in one update. Returns the matched count.
    async fn set_fields(&self, id: &str, changes: &PostChanges) -> Result<u64, RepoError>;

    /// Append `comment`, creating the list if absent, without rewriting
    /// existing items. Returns the matched count.
    async fn push_comment(&self, id: &str, comment: &Comment) -> Result<u64, RepoError>;

    /// Returns the deleted count.
    async fn delete_one(&self, id: &str) -> Result<u64, RepoError>;
}
