//! Domain-level error types.

use thiserror::Error;

/// Domain errors - returned by every post repository operation.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing or blank required input. Caller bug, never retried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Post not found: {id}")]
    PostNotFound { id: String },

    /// The document store failed; the caller must assume no durable change happened.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] RepoError),
}

impl DomainError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn post_not_found(id: impl Into<String>) -> Self {
        Self::PostNotFound { id: id.into() }
    }

    /// Whether retrying with backoff may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable(RepoError::Connection(_) | RepoError::Timeout(_))
        )
    }
}

/// Store-level errors raised by `PostStore` implementations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),
}
