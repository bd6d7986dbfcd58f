//! Gateway doubles for service tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ContentStore, MemoryStore};
use crate::{
    error::StoreError,
    models::{
        comment::{Comment, NewComment},
        like::Like,
        post::{NewPost, Post},
    },
};

/// Gateway whose every call times out.
pub struct UnreachableStore;

#[async_trait]
impl ContentStore for UnreachableStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        Err(StoreError::Read("upstream timeout".into()))
    }
    async fn create_post(&self, _: NewPost) -> Result<Post, StoreError> {
        Err(StoreError::Write("upstream timeout".into()))
    }
    async fn list_comments(&self, _: &str) -> Result<Vec<Comment>, StoreError> {
        Err(StoreError::Read("upstream timeout".into()))
    }
    async fn append_comment(&self, _: NewComment) -> Result<Comment, StoreError> {
        Err(StoreError::Write("upstream timeout".into()))
    }
    async fn list_likes(&self, _: &str) -> Result<Vec<Like>, StoreError> {
        Err(StoreError::Read("upstream timeout".into()))
    }
    async fn create_like(&self, _: &str, _: &str) -> Result<Like, StoreError> {
        Err(StoreError::Write("upstream timeout".into()))
    }
    async fn delete_like(&self, _: &str) -> Result<(), StoreError> {
        Err(StoreError::Write("upstream timeout".into()))
    }
}

/// Reads are served from `inner`; every write fails and is counted.
#[derive(Default)]
pub struct ReadOnlyStore {
    pub inner: MemoryStore,
    writes: AtomicUsize,
}

impl ReadOnlyStore {
    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn reject_write(&self) -> StoreError {
        self.writes.fetch_add(1, Ordering::SeqCst);
        StoreError::Write("read-only replica".into())
    }
}

#[async_trait]
impl ContentStore for ReadOnlyStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.inner.list_posts().await
    }
    async fn create_post(&self, _: NewPost) -> Result<Post, StoreError> {
        Err(self.reject_write())
    }
    async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        self.inner.list_comments(post_id).await
    }
    async fn append_comment(&self, _: NewComment) -> Result<Comment, StoreError> {
        Err(self.reject_write())
    }
    async fn list_likes(&self, post_id: &str) -> Result<Vec<Like>, StoreError> {
        self.inner.list_likes(post_id).await
    }
    async fn create_like(&self, _: &str, _: &str) -> Result<Like, StoreError> {
        Err(self.reject_write())
    }
    async fn delete_like(&self, _: &str) -> Result<(), StoreError> {
        Err(self.reject_write())
    }
}
