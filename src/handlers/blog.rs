use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{
        post::{AggregatedPost, CreatePostRequest, PostPageResponse},
        user::CurrentUser,
    },
    services::{AccountService, PostAggregator, PostService},
    utils::jwt::Claims,
};

/// All posts, newest first, each with its comments.
pub async fn list_all(
    State(aggregator): State<PostAggregator>,
) -> Result<Json<Vec<AggregatedPost>>, AppError> {
    Ok(Json(aggregator.feed().await?))
}

/// The most recent post with navigation.
pub async fn show_latest(
    State(accounts): State<AccountService>,
    State(aggregator): State<PostAggregator>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<PostPageResponse>, AppError> {
    render_post(&accounts, &aggregator, &claims, None).await
}

/// A post by id with navigation. Unknown ids are 404.
pub async fn show_post(
    State(accounts): State<AccountService>,
    State(aggregator): State<PostAggregator>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<PostPageResponse>, AppError> {
    render_post(&accounts, &aggregator, &claims, Some(&id)).await
}

async fn render_post(
    accounts: &AccountService,
    aggregator: &PostAggregator,
    claims: &Claims,
    requested_id: Option<&str>,
) -> Result<Json<PostPageResponse>, AppError> {
    let user = accounts.resolve(claims).await?;
    let page = aggregator
        .post_with_navigation(requested_id, &user.id)
        .await?;

    Ok(Json(PostPageResponse {
        page,
        current_user: CurrentUser::from(&user),
    }))
}

/// Create a new post authored by the signed-in user.
pub async fn create_post(
    State(accounts): State<AccountService>,
    State(posts): State<PostService>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let author = accounts.resolve(&claims).await?;
    let post = posts.create(&author, payload).await?;

    Ok((StatusCode::CREATED, Json(post)))
}
