//! Ports - trait definitions for external dependencies.
//! `PostStore` is implemented by infrastructure, `PostRepository` is consumed by callers.

mod repository;
mod store;

pub use repository::PostRepository;
pub use store::{PostChanges, PostFilter, PostStore};
