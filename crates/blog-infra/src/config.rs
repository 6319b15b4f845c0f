//! Repository configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use blog_core::service::DEFAULT_OPERATION_TIMEOUT;

pub const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017/blog";
pub const DEFAULT_DATABASE: &str = "blog";
pub const DEFAULT_COLLECTION: &str = "posts";

/// Configuration for the document database.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    /// Used when the URL carries no database name.
    pub database: String,
    pub collection: String,
    pub max_pool_size: u32,
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_MONGODB_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            max_pool_size: 100,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Top-level configuration for building a post repository.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogConfig {
    /// `None` when `MONGODB_URL` is unset - the in-memory store is used instead.
    pub database: Option<DatabaseConfig>,
    /// Upper bound for a single store round-trip.
    pub operation_timeout: Duration,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            database: None,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

impl BlogConfig {
    /// Load `.env` if present, then read the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_ms = |key: &str| {
            var(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        let database = var("MONGODB_URL").map(|url| {
            let defaults = DatabaseConfig::default();
            DatabaseConfig {
                url,
                database: var("MONGODB_DATABASE").unwrap_or(defaults.database),
                collection: var("MONGODB_COLLECTION").unwrap_or(defaults.collection),
                max_pool_size: var("DB_MAX_POOL_SIZE")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.max_pool_size),
                connect_timeout: parse_ms("DB_CONNECT_TIMEOUT_MS")
                    .unwrap_or(defaults.connect_timeout),
            }
        });

        Self {
            database,
            operation_timeout: parse_ms("DB_OPERATION_TIMEOUT_MS")
                .unwrap_or(DEFAULT_OPERATION_TIMEOUT),
        }
    }
}
