//! Post repository service over an abstract document store.
//!
//! # Invariants
//! - Ids and creation times are assigned here, never taken from updates.
//! - Each mutating operation issues exactly one atomic store primitive, and
//!   not-found is derived from that primitive's match count.
//! - Comments are appended through `PostStore::push_comment`, never by
//!   reading the post and writing the whole list back.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    Comment, CommentCreateInfo, Post, PostCreateInfo, PostSearchInfo, PostUpdateInfo, PostsList,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostChanges, PostFilter, PostRepository, PostStore};

/// Default upper bound for a single store round-trip.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// `PostRepository` implementation generic over the backing store.
pub struct BlogRepository<S> {
    store: Arc<S>,
    operation_timeout: Duration,
}

impl<S> Clone for BlogRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            operation_timeout: self.operation_timeout,
        }
    }
}

impl<S: PostStore> BlogRepository<S> {
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    pub fn from_arc(store: Arc<S>) -> Self {
        Self {
            store,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one store primitive under the operation timeout.
    async fn call<T, F>(&self, operation: &'static str, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, RepoError>>,
    {
        let err = match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => err,
            Err(_) => RepoError::Timeout(self.operation_timeout),
        };
        tracing::error!(operation, error = %err, "Post store operation failed");
        Err(err.into())
    }
}

fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str, DomainError> {
    if id.trim().is_empty() {
        return Err(DomainError::invalid_argument(format!("{what} must not be empty")));
    }
    Ok(id)
}

fn require_text(value: &str, what: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_argument(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Translate search criteria into a store filter. A blank tag is no filter.
fn build_filter(search: &PostSearchInfo) -> PostFilter {
    PostFilter {
        tag: search
            .tag
            .as_ref()
            .filter(|tag| !tag.trim().is_empty())
            .cloned(),
        created_from: search.from_created_at,
        created_before: search.to_created_at,
    }
}

fn not_found(id: &str) -> DomainError {
    tracing::warn!(post_id = %id, "Post not found");
    DomainError::post_not_found(id)
}

#[async_trait]
impl<S: PostStore> PostRepository for BlogRepository<S> {
    async fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        let id = require_id(id, "post id")?;
        tracing::debug!(post_id = %id, "Getting post");

        self.call("find_by_id", self.store.find_by_id(id))
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn search_posts(&self, search: &PostSearchInfo) -> Result<PostsList, DomainError> {
        let filter = build_filter(search);
        let limit = search.effective_limit();
        let offset = search.effective_offset();
        tracing::debug!(?filter, limit, offset, "Searching posts");

        if let (Some(from), Some(to)) = (filter.created_from, filter.created_before) {
            if from >= to {
                return Ok(PostsList::empty());
            }
        }

        let total = self.call("count", self.store.count(&filter)).await?;
        if total == 0 || limit == 0 {
            return Ok(PostsList {
                posts: Vec::new(),
                total,
            });
        }

        let posts = self
            .call("find", self.store.find(&filter, offset, limit))
            .await?;

        Ok(PostsList { posts, total })
    }

    async fn create_post(&self, info: PostCreateInfo) -> Result<Post, DomainError> {
        let post = Post::new(info);
        let id = post.id.clone();

        self.call("insert_one", self.store.insert_one(&post)).await?;
        tracing::info!(post_id = %id, "Post created");

        // Re-read so callers see what the store actually persisted.
        self.call("find_by_id", self.store.find_by_id(id.as_str()))
            .await?
            .ok_or_else(|| not_found(id.as_str()))
    }

    async fn update_post(&self, id: &str, info: PostUpdateInfo) -> Result<(), DomainError> {
        let id = require_id(id, "post id")?;
        let changes = PostChanges {
            title: info.title,
            text: info.text,
            tags: info.tags,
        };
        tracing::debug!(post_id = %id, ?changes, "Updating post");

        let matched = self
            .call("set_fields", self.store.set_fields(id, &changes))
            .await?;
        if matched == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn delete_post(&self, id: &str) -> Result<(), DomainError> {
        let id = require_id(id, "post id")?;

        let deleted = self.call("delete_one", self.store.delete_one(id)).await?;
        if deleted == 0 {
            return Err(not_found(id));
        }
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn create_comment(
        &self,
        post_id: &str,
        info: CommentCreateInfo,
    ) -> Result<(), DomainError> {
        let post_id = require_id(post_id, "post id")?;
        require_text(&info.username, "comment username")?;
        require_text(&info.text, "comment text")?;

        let comment = Comment::new(info);
        tracing::debug!(post_id = %post_id, username = %comment.username, "Appending comment");

        let matched = self
            .call("push_comment", self.store.push_comment(post_id, &comment))
            .await?;
        if matched == 0 {
            return Err(not_found(post_id));
        }
        Ok(())
    }
}
