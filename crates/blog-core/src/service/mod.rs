//! Services implementing the repository ports.

mod blog_repository;

pub use blog_repository::{BlogRepository, DEFAULT_OPERATION_TIMEOUT};
