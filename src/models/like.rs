use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'likes' collection.
/// At most one row per (post_id, user_id) is kept by the like service, not by the store.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
}

/// Like state of a post as seen by one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeSummary {
    pub like_count: u64,
    pub user_liked: bool,
}

impl LikeSummary {
    pub fn from_likes(likes: &[Like], user_id: &str) -> Self {
        Self {
            like_count: likes.len() as u64,
            user_liked: likes.iter().any(|like| like.user_id == user_id),
        }
    }
}

/// DTO for `POST /blog/like`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLikeRequest {
    pub post_id: String,
    #[serde(alias = "desired")]
    pub new_liked: bool,
}
