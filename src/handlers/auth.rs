// src/handlers/auth.rs

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::{
    config::Config,
    error::{AppError, LOGIN_PAGE},
    models::user::{CurrentUser, LoginRequest, RegisterRequest},
    services::AccountService,
    utils::jwt::{Claims, clear_session, session_cookie},
};

/// Where a freshly signed-in user lands: the most recent post.
const LANDING_PAGE: &str = "/blog/post";

/// Registers a new user and signs them in.
///
/// Returns 201 Created with the public user view and sets the `access_token` cookie.
pub async fn register(
    State(accounts): State<AccountService>,
    State(config): State<Config>,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let (user, token) = accounts.register(payload).await?;

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(token, config.cookie_secure)),
        Json(json!({
            "user": CurrentUser::from(&user),
            "redirect": LANDING_PAGE,
        })),
    ))
}

/// Authenticates a user and sets the session cookie.
pub async fn login(
    State(accounts): State<AccountService>,
    State(config): State<Config>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let (user, token) = accounts.login(payload).await?;

    Ok((
        jar.add(session_cookie(token, config.cookie_secure)),
        Json(json!({
            "user": CurrentUser::from(&user),
            "redirect": LANDING_PAGE,
        })),
    ))
}

/// Clears the session cookie. Nothing is revoked server-side.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (clear_session(jar), Redirect::to(LOGIN_PAGE))
}

/// Details of the signed-in user.
pub async fn me(
    State(accounts): State<AccountService>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<CurrentUser>, AppError> {
    let user = accounts.resolve(&claims).await?;
    Ok(Json(CurrentUser::from(&user)))
}
