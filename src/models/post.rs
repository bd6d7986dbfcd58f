use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;
use validator::Validate;

use crate::models::{comment::Comment, like::LikeSummary, user::CurrentUser};

/// Represents the 'posts' collection.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub subheader: String,
    pub image_url: String,
    /// Sanitized HTML.
    pub content: String,
    pub author_id: String,
    pub author_email: String,

    pub created_at: DateTime<Utc>,
    /// Equal to `created_at`; posts have no edit path.
    pub updated_at: DateTime<Utc>,
}

/// Fields for a post about to be written. Timestamps and id are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub subheader: String,
    pub image_url: String,
    pub content: String,
    pub author_id: String,
    pub author_email: String,
}

/// DTO for creating a new post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Post Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Post Subheader is required"))]
    pub subheader: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "Image URL is required"),
        custom(function = validate_url_string)
    )]
    pub image_url: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Article content is required"))]
    pub content: String,
}

impl CreatePostRequest {
    /// Strips surrounding whitespace so that blank fields fail validation.
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            subheader: self.subheader.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            content: self.content.trim().to_string(),
        }
    }
}

/// Validates that a string is a correctly formatted URL.
/// Blank input is left to the length rule.
fn validate_url_string(url: &str) -> Result<(), validator::ValidationError> {
    if !url.is_empty() && Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url")
            .with_message(Cow::Borrowed("Image URL must be a valid URL")));
    }
    Ok(())
}

/// A post composed with its comments and, on the single-post read, its like state.
/// Recomputed on every read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPost {
    #[serde(flatten)]
    pub post: Post,
    /// Ascending by timestamp.
    pub comments: Vec<Comment>,
    /// `None` on the feed listing, which never reads likes.
    #[serde(flatten)]
    pub likes: Option<LikeSummary>,
}

/// A selected post plus its neighbours in the freshly fetched, newest-first list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub post: AggregatedPost,
    /// Newer neighbour.
    pub previous_id: Option<String>,
    /// Older neighbour.
    pub next_id: Option<String>,
}

/// Body of `GET /blog/post[/{id}]`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPageResponse {
    #[serde(flatten)]
    pub page: PostPage,
    pub current_user: CurrentUser,
}
