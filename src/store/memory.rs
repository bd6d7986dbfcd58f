use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

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

#[derive(Debug, Default)]
struct Collections {
    // Insertion order; used to break timestamp ties.
    posts: Vec<Post>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    users: Vec<User>,
}

/// In-process store used by tests and `DATABASE_URL=memory`.
///
/// Each call takes the lock on its own, so a read followed by a write from a
/// caller is not atomic, the same as with the hosted store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let inner = self.inner.read().await;
        // Newest insert first among equal timestamps; sort_by is stable.
        let mut posts: Vec<Post> = inner.posts.iter().rev().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let now = Utc::now();
        let post = Post {
            id: new_id(),
            title: post.title,
            subheader: post.subheader,
            image_url: post.image_url,
            content: post.content,
            author_id: post.author_id,
            author_email: post.author_email,
            created_at: now,
            updated_at: now,
        };

        self.inner.write().await.posts.push(post.clone());
        Ok(post)
    }

    async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        let inner = self.inner.read().await;
        let mut comments: Vec<Comment> = inner
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(comments)
    }

    async fn append_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let comment = Comment {
            id: new_id(),
            post_id: comment.post_id,
            user_id: comment.user_id,
            user_email: comment.user_email,
            body: comment.body,
            timestamp: Utc::now(),
        };

        self.inner.write().await.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_likes(&self, post_id: &str) -> Result<Vec<Like>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .likes
            .iter()
            .filter(|l| l.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create_like(&self, post_id: &str, user_id: &str) -> Result<Like, StoreError> {
        let like = Like {
            id: new_id(),
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
        };

        self.inner.write().await.likes.push(like.clone());
        Ok(like)
    }

    async fn delete_like(&self, like_id: &str) -> Result<(), StoreError> {
        self.inner.write().await.likes.retain(|l| l.id != like_id);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "email '{}' already registered",
                user.email
            )));
        }

        let user = User {
            id: new_id(),
            display_name: user.display_name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }
}
