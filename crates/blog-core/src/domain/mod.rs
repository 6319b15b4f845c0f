//! Domain entities - posts, their embedded comments and search results.

mod comment;
mod post;
mod search;

pub use comment::{Comment, CommentCreateInfo};
pub use post::{Post, PostCreateInfo, PostId, PostUpdateInfo};
pub use search::{DEFAULT_SEARCH_LIMIT, PostSearchInfo, PostsList};
