use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppError,
    models::{
        post::{CreatePostRequest, NewPost, Post},
        user::User,
    },
    store::ContentStore,
    utils::html::sanitize_field,
};

/// Post authoring. The image is expected to be uploaded already; only its URL is stored.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn ContentStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, author: &User, request: CreatePostRequest) -> Result<Post, AppError> {
        let request = request.trimmed();
        request.validate()?;

        let title = sanitize_field(&request.title);
        let subheader = sanitize_field(&request.subheader);
        let content = sanitize_field(&request.content);

        let empty: Vec<String> = [("title", &title), ("subheader", &subheader), ("content", &content)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| format!("{} is required", field))
            .collect();
        if !empty.is_empty() {
            return Err(AppError::Validation(empty));
        }

        let post = self
            .store
            .create_post(NewPost {
                title,
                subheader,
                image_url: request.image_url,
                content,
                author_id: author.id.clone(),
                author_email: author.email.clone(),
            })
            .await?;

        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Blog post saved");
        Ok(post)
    }
}
