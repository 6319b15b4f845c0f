//! In-memory post store - used as fallback when no database is configured.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use tokio::sync::RwLock;

use blog_core::domain::{Comment, Post};
use blog_core::error::RepoError;
use blog_core::ports::{PostChanges, PostFilter, PostStore};

/// In-memory post store backed by a vector in insertion order.
///
/// Every primitive runs under a single lock acquisition, so each one is
/// atomic just like a single-document update on a real store. Timestamps
/// are truncated to milliseconds to mirror BSON dates.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn normalize(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(3)
}

/// Bounds are compared at the same precision as stored timestamps.
fn normalize_filter(filter: &PostFilter) -> PostFilter {
    PostFilter {
        tag: filter.tag.clone(),
        created_from: filter.created_from.map(normalize),
        created_before: filter.created_before.map(normalize),
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id.as_str() == id).cloned())
    }

    async fn find(&self, filter: &PostFilter, skip: u64, limit: u32) -> Result<Vec<Post>, RepoError> {
        let filter = normalize_filter(filter);
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| filter.matches(p))
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let filter = normalize_filter(filter);
        let posts = self.posts.read().await;
        Ok(posts.iter().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn insert_one(&self, post: &Post) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("Post already exists".to_string()));
        }

        let mut stored = post.clone();
        stored.created_at = normalize(stored.created_at);
        for comment in &mut stored.comments {
            comment.created_at = normalize(comment.created_at);
        }
        posts.push(stored);
        Ok(())
    }

    async fn set_fields(&self, id: &str, changes: &PostChanges) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id.as_str() == id) else {
            return Ok(0);
        };

        if let Some(title) = &changes.title {
            post.title = Some(title.clone());
        }
        if let Some(text) = &changes.text {
            post.text = Some(text.clone());
        }
        if let Some(tags) = &changes.tags {
            post.tags = Some(tags.clone());
        }
        Ok(1)
    }

    async fn push_comment(&self, id: &str, comment: &Comment) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id.as_str() == id) else {
            return Ok(0);
        };

        let mut comment = comment.clone();
        comment.created_at = normalize(comment.created_at);
        post.comments.push(comment);
        Ok(1)
    }

    async fn delete_one(&self, id: &str) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter().position(|p| p.id.as_str() == id) {
            Some(index) => {
                posts.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
