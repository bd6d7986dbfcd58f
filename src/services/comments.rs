use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppError,
    models::{
        comment::{Comment, CreateCommentRequest, NewComment},
        user::User,
    },
    store::ContentStore,
    utils::html::sanitize_field,
};

const COMMENT_REQUIRED: &str = "Comment is required before submission";

/// Appends sanitized comments. The target post is not checked for existence.
#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn ContentStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub async fn append(
        &self,
        author: &User,
        request: CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        let request = CreateCommentRequest {
            post_id: request.post_id.trim().to_string(),
            body: request.body.trim().to_string(),
        };
        request.validate()?;

        // Markup-only input can be empty once cleaned.
        let body = sanitize_field(&request.body);
        if body.is_empty() {
            return Err(AppError::validation(COMMENT_REQUIRED));
        }

        let comment = self
            .store
            .append_comment(NewComment {
                post_id: request.post_id,
                user_id: author.id.clone(),
                user_email: author.email.clone(),
                body,
            })
            .await?;

        tracing::info!(post_id = %comment.post_id, user_id = %comment.user_id, "Comment added");
        Ok(comment)
    }
}
