//! Idempotent like/unlike on top of the gateway.
//!
//! The read-then-write sequence is not atomic and the store has no uniqueness
//! constraint: two concurrent `set_liked(p, u, true)` calls may both see no row
//! and both insert. A later `set_liked(p, u, false)` removes one row per call.

use std::sync::Arc;

use crate::{error::AppError, models::like::LikeSummary, store::ContentStore};

#[derive(Clone)]
pub struct LikeService {
    store: Arc<dyn ContentStore>,
}

impl LikeService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Moves the (post, user) pair to the `desired` state and returns the
    /// recomputed aggregate. Already being in that state is a no-op.
    pub async fn set_liked(
        &self,
        post_id: &str,
        user_id: &str,
        desired: bool,
    ) -> Result<LikeSummary, AppError> {
        let likes = self.store.list_likes(post_id).await?;
        let existing = likes.iter().find(|like| like.user_id == user_id);

        match (desired, existing) {
            (true, None) => {
                self.store.create_like(post_id, user_id).await?;
                tracing::debug!(post_id, user_id, "Like added");
            }
            (false, Some(like)) => {
                self.store.delete_like(&like.id).await?;
                tracing::debug!(post_id, user_id, "Like removed");
            }
            _ => tracing::debug!(post_id, user_id, desired, "Like already in requested state"),
        }

        self.summary(post_id, user_id).await
    }

    pub async fn summary(&self, post_id: &str, user_id: &str) -> Result<LikeSummary, AppError> {
        let likes = self.store.list_likes(post_id).await?;
        Ok(LikeSummary::from_likes(&likes, user_id))
    }
}
