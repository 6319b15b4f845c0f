//! BSON document shapes for the posts collection.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use blog_core::domain::{Comment, Post, PostId};

/// One post document, keyed by `_id`, comments embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Absent (or null) until the first comment is pushed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentDocument>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDocument {
    pub username: String,
    pub text: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Self {
            id: PostId::from(doc.id),
            title: doc.title,
            text: doc.text,
            tags: doc.tags,
            created_at: doc.created_at,
            comments: doc
                .comments
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<&Post> for PostDocument {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.as_str().to_owned(),
            title: post.title.clone(),
            text: post.text.clone(),
            tags: post.tags.clone(),
            created_at: post.created_at,
            comments: (!post.comments.is_empty())
                .then(|| post.comments.iter().map(Into::into).collect()),
        }
    }
}

impl From<CommentDocument> for Comment {
    fn from(doc: CommentDocument) -> Self {
        Self {
            username: doc.username,
            text: doc.text,
            created_at: doc.created_at,
        }
    }
}

impl From<&Comment> for CommentDocument {
    fn from(comment: &Comment) -> Self {
        Self {
            username: comment.username.clone(),
            text: comment.text.clone(),
            created_at: comment.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::PostCreateInfo;
    use bson::{Bson, doc};

    #[test]
    fn test_new_post_document_omits_comments() {
        let post = Post::new(PostCreateInfo::default().with_title("t"));
        let doc = bson::to_document(&PostDocument::from(&post)).unwrap();

        assert_eq!(doc.get_str("_id").unwrap(), post.id.as_str());
        assert_eq!(doc.get_str("title").unwrap(), "t");
        assert!(matches!(doc.get("createdAt"), Some(Bson::DateTime(_))));
        assert!(!doc.contains_key("comments"));
        assert!(!doc.contains_key("text"));
    }

    #[test]
    fn test_null_comments_read_as_empty() {
        let raw = doc! {
            "_id": "p1",
            "title": Bson::Null,
            "tags": ["food", "sport"],
            "createdAt": bson::DateTime::from_millis(1_600_000_000_000),
            "comments": Bson::Null,
        };

        let post: Post = bson::from_document::<PostDocument>(raw).unwrap().into();

        assert_eq!(post.id.as_str(), "p1");
        assert_eq!(post.title, None);
        assert!(post.comments.is_empty());
        assert_eq!(post.created_at.timestamp_millis(), 1_600_000_000_000);
    }
}
