//! Post store adapters and database connection management.

mod memory;

#[cfg(feature = "mongodb")]
mod connections;
#[cfg(feature = "mongodb")]
pub mod document;
#[cfg(feature = "mongodb")]
mod mongo_store;

pub use memory::InMemoryPostStore;

#[cfg(feature = "mongodb")]
pub use connections::DatabaseConnections;
#[cfg(feature = "mongodb")]
pub use mongo_store::MongoPostStore;
