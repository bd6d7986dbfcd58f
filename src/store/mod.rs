//! Content Store Gateway.
//!
//! Pure data access over the flat `posts`, `comments` and `likes` collections
//! plus the user directory. No joins and no policy: composition happens in
//! `services`. Every call is an independent async round trip; failures come
//! back as `StoreError::Read` / `StoreError::Write` and are never retried here.

pub mod memory;
pub mod postgres;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::{
    error::StoreError,
    models::{
        comment::{Comment, NewComment},
        like::Like,
        post::{NewPost, Post},
        user::{NewUser, User},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All posts, newest first. Equal `created_at` values have no guaranteed order.
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Stamps `created_at` and `updated_at` (equal) at write time.
    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Comments of one post, oldest first.
    async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, StoreError>;

    async fn append_comment(&self, comment: NewComment) -> Result<Comment, StoreError>;

    async fn list_likes(&self, post_id: &str) -> Result<Vec<Like>, StoreError>;

    /// Unconditional insert. Duplicate (post, user) rows are not rejected.
    async fn create_like(&self, post_id: &str, user_id: &str) -> Result<Like, StoreError>;

    async fn delete_like(&self, like_id: &str) -> Result<(), StoreError>;
}

/// Lookup side of the identity provider.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fails with `StoreError::Conflict` when the email is already registered.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
