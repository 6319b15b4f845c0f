//! MongoDB implementation of the post store.

use async_trait::async_trait;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Collection, IndexModel};

use blog_core::domain::{Comment, Post};
use blog_core::error::RepoError;
use blog_core::ports::{PostChanges, PostFilter, PostStore};

use super::connections::DatabaseConnections;
use super::document::{CommentDocument, PostDocument};

const DUPLICATE_KEY: i32 = 11000;

/// Post store over a single MongoDB collection.
#[derive(Clone)]
pub struct MongoPostStore {
    collection: Collection<PostDocument>,
}

impl MongoPostStore {
    pub fn new(collection: Collection<PostDocument>) -> Self {
        Self { collection }
    }

    pub fn from_connections(connections: &DatabaseConnections, collection: &str) -> Self {
        Self::new(connections.posts(collection))
    }

    /// Create the secondary indexes used by search.
    pub async fn ensure_indexes(&self) -> Result<(), RepoError> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "tags": 1 }).build(),
            IndexModel::builder().keys(doc! { "createdAt": 1 }).build(),
        ];
        self.collection
            .create_indexes(indexes)
            .await
            .map_err(map_mongo_error)?;
        tracing::debug!(collection = %self.collection.name(), "Post indexes ensured");
        Ok(())
    }

    /// Drop every post. Used to reset state between test runs.
    pub async fn drop_collection(&self) -> Result<(), RepoError> {
        self.collection.drop().await.map_err(map_mongo_error)
    }
}

/// Build the query document for a filter.
pub(crate) fn filter_document(filter: &PostFilter) -> Document {
    let mut query = Document::new();
    if let Some(tag) = &filter.tag {
        // Equality against an array field matches any element.
        query.insert("tags", tag.as_str());
    }

    let mut created_at = Document::new();
    if let Some(from) = filter.created_from {
        created_at.insert("$gte", bson::DateTime::from_chrono(from));
    }
    if let Some(to) = filter.created_before {
        created_at.insert("$lt", bson::DateTime::from_chrono(to));
    }
    if !created_at.is_empty() {
        query.insert("createdAt", created_at);
    }
    query
}

/// `$set` body for the present fields only.
pub(crate) fn set_document(changes: &PostChanges) -> Document {
    let mut set = Document::new();
    if let Some(title) = &changes.title {
        set.insert("title", title.as_str());
    }
    if let Some(text) = &changes.text {
        set.insert("text", text.as_str());
    }
    if let Some(tags) = &changes.tags {
        set.insert("tags", tags.clone());
    }
    set
}

/// Single-stage pipeline update: create the list when missing or null,
/// otherwise append. `$literal` keeps user text from being read as an
/// expression.
pub(crate) fn push_comment_pipeline(comment: Bson) -> Vec<Document> {
    vec![doc! {
        "$set": {
            "comments": {
                "$concatArrays": [
                    { "$ifNull": ["$comments", []] },
                    { "$literal": [comment] },
                ]
            }
        }
    }]
}

fn id_filter(id: &str) -> Document {
    doc! { "_id": id }
}

fn map_mongo_error(err: mongodb::error::Error) -> RepoError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
            RepoError::Constraint("Post already exists".to_string())
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let result = self
            .collection
            .find_one(id_filter(id))
            .await
            .map_err(map_mongo_error)?;

        Ok(result.map(Into::into))
    }

    async fn find(&self, filter: &PostFilter, skip: u64, limit: u32) -> Result<Vec<Post>, RepoError> {
        let cursor = self
            .collection
            .find(filter_document(filter))
            .skip(skip)
            .limit(i64::from(limit))
            .await
            .map_err(map_mongo_error)?;

        let documents: Vec<PostDocument> = cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        self.collection
            .count_documents(filter_document(filter))
            .await
            .map_err(map_mongo_error)
    }

    async fn insert_one(&self, post: &Post) -> Result<(), RepoError> {
        self.collection
            .insert_one(PostDocument::from(post))
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }

    async fn set_fields(&self, id: &str, changes: &PostChanges) -> Result<u64, RepoError> {
        // An empty $set is rejected by the server, so a no-op only reports the match.
        if changes.is_empty() {
            return self
                .collection
                .count_documents(id_filter(id))
                .await
                .map_err(map_mongo_error);
        }

        let result = self
            .collection
            .update_one(id_filter(id), doc! { "$set": set_document(changes) })
            .await
            .map_err(map_mongo_error)?;
        Ok(result.matched_count)
    }

    async fn push_comment(&self, id: &str, comment: &Comment) -> Result<u64, RepoError> {
        let comment = bson::to_bson(&CommentDocument::from(comment))
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let result = self
            .collection
            .update_one(id_filter(id), push_comment_pipeline(comment))
            .await
            .map_err(map_mongo_error)?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, id: &str) -> Result<u64, RepoError> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count)
    }
}


/// Live-server tests. Run with `MONGODB_URL` set and `--ignored`.
#[cfg(test)]
mod live_tests {
    use std::sync::Arc;

    use blog_core::BlogRepository;
    use blog_core::domain::{CommentCreateInfo, PostCreateInfo, PostUpdateInfo};
    use blog_core::ports::PostRepository;

    use super::*;
    use crate::config::{BlogConfig, DatabaseConfig};

    async fn live_repo(collection: &str) -> BlogRepository<MongoPostStore> {
        let mut config = BlogConfig::from_env()
            .database
            .unwrap_or_else(DatabaseConfig::default);
        config.collection = collection.to_string();

        let connections = DatabaseConnections::init(&config).await.unwrap();
        let store = MongoPostStore::from_connections(&connections, &config.collection);
        store.drop_collection().await.unwrap();
        store.ensure_indexes().await.unwrap();
        BlogRepository::new(store)
    }

    #[tokio::test]
    #[ignore = "requires a running MongoDB"]
    async fn test_live_partial_update_and_comment() {
        let repo = live_repo("posts_live_update").await;
        let post = repo
            .create_post(
                PostCreateInfo::default()
                    .with_title("title")
                    .with_text("text")
                    .with_tags(["food", "sport"]),
            )
            .await
            .unwrap();

        repo.update_post(post.id.as_str(), PostUpdateInfo::default().with_text("other"))
            .await
            .unwrap();
        repo.create_comment(post.id.as_str(), CommentCreateInfo::new("alice", "hi"))
            .await
            .unwrap();

        let stored = repo.get_post(post.id.as_str()).await.unwrap();
        assert_eq!(stored.title.as_deref(), Some("title"));
        assert_eq!(stored.text.as_deref(), Some("other"));
        assert_eq!(stored.tags, post.tags);
        assert_eq!(stored.created_at, post.created_at);
        assert_eq!(stored.comments.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore = "requires a running MongoDB"]
    async fn test_live_concurrent_first_comments_are_not_lost() {
        let repo = Arc::new(live_repo("posts_live_comments").await);
        let post = repo.create_post(PostCreateInfo::default()).await.unwrap();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo = Arc::clone(&repo);
                let id = post.id.clone();
                tokio::spawn(async move {
                    repo.create_comment(id.as_str(), CommentCreateInfo::new(format!("user{i}"), "hi"))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = repo.get_post(post.id.as_str()).await.unwrap();
        assert_eq!(stored.comments.len(), 20);
    }
}
