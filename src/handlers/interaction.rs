use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    response::Redirect,
};

use crate::{
    error::AppError,
    models::{
        comment::CreateCommentRequest,
        like::{LikeSummary, SetLikeRequest},
    },
    services::{AccountService, CommentService, LikeService},
    utils::jwt::Claims,
};

/// Set the signed-in user's like on a post to the requested state.
pub async fn set_like(
    State(accounts): State<AccountService>,
    State(likes): State<LikeService>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<SetLikeRequest>, JsonRejection>,
) -> Result<Json<LikeSummary>, AppError> {
    let Json(payload) = payload?;
    let user = accounts.resolve(&claims).await?;
    let summary = likes
        .set_liked(&payload.post_id, &user.id, payload.new_liked)
        .await?;
    Ok(Json(summary))
}

/// Create a new comment, then send the client back to the post.
pub async fn create_comment(
    State(accounts): State<AccountService>,
    State(comments): State<CommentService>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<Redirect, AppError> {
    let Json(payload) = payload?;
    let author = accounts.resolve(&claims).await?;
    let comment = comments.append(&author, payload).await?;

    Ok(Redirect::to(&format!("/blog/post/{}", comment.post_id)))
}
