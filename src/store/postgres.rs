use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::{ContentStore, UserDirectory, new_id};
use crate::{
    error::StoreError,
    models::{
        comment::{Comment, NewComment},
        like::Like,
        post::{NewPost, Post},
        user::{NewUser, User},
    },
};

/// PostgreSQL-backed gateway.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn read_err(context: &str, e: sqlx::Error) -> StoreError {
    tracing::error!("Failed to {}: {:?}", context, e);
    StoreError::Read(e.to_string())
}

fn write_err(context: &str, e: sqlx::Error) -> StoreError {
    tracing::error!("Failed to {}: {:?}", context, e);
    StoreError::Write(e.to_string())
}

#[async_trait]
impl ContentStore for PgStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT
                id, title, subheader, image_url, content,
                author_id, author_email, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_err("list posts", e))
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let now = Utc::now();

        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts
                (id, title, subheader, image_url, content, author_id, author_email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING
                id, title, subheader, image_url, content,
                author_id, author_email, created_at, updated_at
            "#,
        )
        .bind(new_id())
        .bind(post.title)
        .bind(post.subheader)
        .bind(post.image_url)
        .bind(post.content)
        .bind(post.author_id)
        .bind(post.author_email)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_err("create post", e))
    }

    async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, user_id, user_email, body, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_err("list comments", e))
    }

    async fn append_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, post_id, user_id, user_email, body, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, post_id, user_id, user_email, body, created_at
            "#,
        )
        .bind(new_id())
        .bind(comment.post_id)
        .bind(comment.user_id)
        .bind(comment.user_email)
        .bind(comment.body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_err("append comment", e))
    }

    async fn list_likes(&self, post_id: &str) -> Result<Vec<Like>, StoreError> {
        sqlx::query_as::<_, Like>("SELECT id, post_id, user_id FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_err("list likes", e))
    }

    async fn create_like(&self, post_id: &str, user_id: &str) -> Result<Like, StoreError> {
        sqlx::query_as::<_, Like>(
            "INSERT INTO likes (id, post_id, user_id) VALUES ($1, $2, $3) RETURNING id, post_id, user_id",
        )
        .bind(new_id())
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_err("create like", e))
    }

    async fn delete_like(&self, like_id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(like_id)
            .execute(&self.pool)
            .await
            .map_err(|e| write_err("delete like", e))?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let email = user.email.clone();

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, display_name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, display_name, email, password_hash, created_at
            "#,
        )
        .bind(new_id())
        .bind(user.display_name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique_violation {
                StoreError::Conflict(format!("email '{}' already registered", email))
            } else {
                write_err("create user", e)
            }
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, display_name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| read_err("find user by email", e))
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, display_name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| read_err("find user by id", e))
    }
}
