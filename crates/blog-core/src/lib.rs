//! # Blog Core
//!
//! The domain layer of the blog post repository.
//! This crate contains the post/comment model, the store and repository
//! ports, and `BlogRepository`, which owns validation, defaulting, filter
//! construction and the choice of atomic store primitives.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::BlogRepository;
