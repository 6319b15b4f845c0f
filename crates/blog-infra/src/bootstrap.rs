//! Repository wiring - picks the store implementation from configuration.

use std::sync::Arc;

use blog_core::BlogRepository;
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use crate::config::BlogConfig;
use crate::database::InMemoryPostStore;

#[cfg(feature = "mongodb")]
use crate::config::DatabaseConfig;
#[cfg(feature = "mongodb")]
use crate::database::{DatabaseConnections, MongoPostStore};

/// Connect to MongoDB, verify the server is reachable and ensure indexes.
#[cfg(feature = "mongodb")]
pub async fn connect(
    database: &DatabaseConfig,
    config: &BlogConfig,
) -> Result<BlogRepository<MongoPostStore>, RepoError> {
    let connections = DatabaseConnections::init(database)
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))?;
    connections
        .ping()
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))?;

    let store = MongoPostStore::from_connections(&connections, &database.collection);
    store.ensure_indexes().await?;

    Ok(BlogRepository::new(store).with_operation_timeout(config.operation_timeout))
}

/// In-memory repository honouring the configured timeout.
pub fn in_memory(config: &BlogConfig) -> BlogRepository<InMemoryPostStore> {
    BlogRepository::new(InMemoryPostStore::new()).with_operation_timeout(config.operation_timeout)
}

/// Build the repository with appropriate implementation.
///
/// Uses the in-memory store only when no database is configured. A
/// configured database that cannot be reached is an error.
pub async fn build_repository(config: &BlogConfig) -> Result<Arc<dyn PostRepository>, RepoError> {
    #[cfg(feature = "mongodb")]
    {
        if let Some(database) = &config.database {
            let repo = connect(database, config).await.map_err(|e| {
                tracing::error!("Failed to connect to database: {}", e);
                e
            })?;
            tracing::info!(collection = %database.collection, "Using MongoDB post store");
            return Ok(Arc::new(repo));
        }
        tracing::warn!("MONGODB_URL not set. Running without database (in-memory mode).");
    }

    #[cfg(not(feature = "mongodb"))]
    tracing::info!("Running without mongodb feature - using in-memory post store");

    Ok(Arc::new(in_memory(config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::PostCreateInfo;

    #[tokio::test]
    async fn test_without_database_uses_in_memory_store() {
        let repo = build_repository(&BlogConfig::default()).await.unwrap();

        let post = repo.create_post(PostCreateInfo::default().with_title("hello")).await.unwrap();
        let fetched = repo.get_post(post.id.as_str()).await.unwrap();
        assert_eq!(fetched.title.as_deref(), Some("hello"));
    }

    #[cfg(feature = "mongodb")]
    #[tokio::test]
    async fn test_unreachable_configured_database_is_an_error() {
        let config = BlogConfig {
            database: Some(DatabaseConfig {
                url: "mongodb://127.0.0.1:1/blog".to_string(),
                connect_timeout: std::time::Duration::from_millis(300),
                ..Default::default()
            }),
            ..Default::default()
        };

        let result = build_repository(&config).await;
        assert!(matches!(result, Err(RepoError::Connection(_))));
    }
}
