//! Post aggregation and sequential pagination.
//!
//! Every read recomputes from a fresh post list. Navigation is positional on
//! that snapshot, not a stable cursor: a post created between two requests
//! shifts what "previous" and "next" resolve to.

use std::sync::Arc;

use crate::{
    error::AppError,
    models::{
        like::LikeSummary,
        post::{AggregatedPost, Post, PostPage},
    },
    store::ContentStore,
};

/// Position of a post in the newest-first list and its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationWindow {
    pub index: usize,
    /// Id at `index - 1` (newer).
    pub previous_id: Option<String>,
    /// Id at `index + 1` (older).
    pub next_id: Option<String>,
}

/// Finds the requested post (or the newest one when `requested_id` is `None`)
/// by linear scan.
pub fn locate(posts: &[Post], requested_id: Option<&str>) -> Result<PaginationWindow, AppError> {
    let index = match requested_id {
        None if posts.is_empty() => return Err(AppError::PostNotFound),
        None => 0,
        Some(id) => posts
            .iter()
            .position(|post| post.id == id)
            .ok_or(AppError::PostNotFound)?,
    };

    Ok(PaginationWindow {
        index,
        previous_id: index.checked_sub(1).map(|i| posts[i].id.clone()),
        next_id: posts.get(index + 1).map(|post| post.id.clone()),
    })
}

#[derive(Clone)]
pub struct PostAggregator {
    store: Arc<dyn ContentStore>,
}

impl PostAggregator {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// All posts newest first, each with its comments.
    ///
    /// Issues one list query plus one comment query per post. Likes are not
    /// read for the listing.
    pub async fn feed(&self) -> Result<Vec<AggregatedPost>, AppError> {
        let posts = self.store.list_posts().await?;

        let mut feed = Vec::with_capacity(posts.len());
        for post in posts {
            let comments = self.store.list_comments(&post.id).await?;
            feed.push(AggregatedPost {
                post,
                comments,
                likes: None,
            });
        }

        tracing::debug!("Aggregated feed of {} posts", feed.len());
        Ok(feed)
    }

    /// One post with comments, like state for `viewer_id`, and its neighbours.
    pub async fn post_with_navigation(
        &self,
        requested_id: Option<&str>,
        viewer_id: &str,
    ) -> Result<PostPage, AppError> {
        let mut posts = self.store.list_posts().await?;
        let window = locate(&posts, requested_id)?;
        let post = posts.swap_remove(window.index);

        let (comments, likes) = tokio::try_join!(
            self.store.list_comments(&post.id),
            self.store.list_likes(&post.id),
        )?;

        Ok(PostPage {
            post: AggregatedPost {
                post,
                comments,
                likes: Some(LikeSummary::from_likes(&likes, viewer_id)),
            },
            previous_id: window.previous_id,
            next_id: window.next_id,
        })
    }
}
