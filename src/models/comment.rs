use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'comments' collection. Append-only.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    /// Not checked against 'posts'.
    pub post_id: String,
    pub user_id: String,
    pub user_email: String,
    pub body: String,
    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: String,
    pub user_id: String,
    pub user_email: String,
    pub body: String,
}

/// DTO for creating a new comment. The author comes from the session.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Post ID is required"))]
    pub post_id: String,

    #[serde(default, alias = "comment")]
    #[validate(length(min = 1, message = "Comment is required before submission"))]
    pub body: String,
}
