use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use crate::config::DatabaseConfig;

use super::document::PostDocument;

/// Handle to the resolved database. It shares the driver's connection pool.
///
/// # Example
/// ```ignore
/// let conn = DatabaseConnections::init(&config).await?;
/// let store = MongoPostStore::new(conn.posts(&config.collection));
/// ```
#[derive(Clone)]
pub struct DatabaseConnections {
    database: Database,
}

impl DatabaseConnections {
    /// Connect using the given configuration.
    ///
    /// A database name in the URL path takes precedence over `config.database`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        tracing::info!("Initializing database connection...");

        let mut options = ClientOptions::parse(&config.url).await?;
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);
        options.app_name = Some("blog-repository".to_string());

        let database_name = options
            .default_database
            .clone()
            .unwrap_or_else(|| config.database.clone());

        let client = Client::with_options(options)?;
        let database = client.database(&database_name);
        tracing::info!(
            database = %database_name,
            pool = config.max_pool_size,
            "Database client ready"
        );

        Ok(Self { database })
    }

    /// Round-trip to the server to verify connectivity.
    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Typed handle to the posts collection.
    pub fn posts(&self, collection: &str) -> Collection<PostDocument> {
        self.database.collection(collection)
    }
}
