use async_trait::async_trait;

use crate::domain::{CommentCreateInfo, Post, PostCreateInfo, PostSearchInfo, PostUpdateInfo, PostsList};
use crate::error::DomainError;

/// Post repository - the operations exposed to callers (API layer etc.).
///
/// Dropping a returned future cancels the operation; implementations bound
/// every store round-trip by a timeout.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch a single post by id.
    async fn get_post(&self, id: &str) -> Result<Post, DomainError>;

    /// Filtered, paginated search. `total` ignores paging.
    async fn search_posts(&self, search: &PostSearchInfo) -> Result<PostsList, DomainError>;

    /// Create a post and return it as stored.
    async fn create_post(&self, info: PostCreateInfo) -> Result<Post, DomainError>;

    /// Apply the fields present in `info` as one atomic update.
    async fn update_post(&self, id: &str, info: PostUpdateInfo) -> Result<(), DomainError>;

    /// Delete a post.
    async fn delete_post(&self, id: &str) -> Result<(), DomainError>;

    /// Atomically append a comment to a post.
    async fn create_comment(&self, post_id: &str, info: CommentCreateInfo) -> Result<(), DomainError>;
}
