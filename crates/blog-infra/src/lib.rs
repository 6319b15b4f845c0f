//! # Blog Infrastructure
//!
//! Concrete implementations of the `PostStore` port defined in `blog-core`,
//! plus configuration, telemetry and repository wiring.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mongodb` - MongoDB document store via the official driver

pub mod bootstrap;
pub mod config;
pub mod database;
pub mod telemetry;

// Re-exports - In-Memory
pub use bootstrap::build_repository;
pub use config::{BlogConfig, DatabaseConfig};
pub use database::InMemoryPostStore;
pub use telemetry::{TelemetryConfig, init_telemetry};

// Re-exports - MongoDB
#[cfg(feature = "mongodb")]
pub use database::{DatabaseConnections, MongoPostStore};
