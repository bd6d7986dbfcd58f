// src/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

pub const LOGIN_PAGE: &str = "/users/login";
pub const REGISTER_PAGE: &str = "/users/register";

/// Authentication failures. Never fatal to the process; each carries a
/// user-facing message and the page the client should be sent to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("User is not authorized")]
    MissingToken,

    #[error("Session has expired. Please log in again.")]
    ExpiredToken,

    #[error("Invalid session. Please log in again.")]
    InvalidToken,

    #[error("User not found. Please register.")]
    UnknownUser,

    #[error("Token generation failed")]
    TokenGenerationError,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Email already registered. Please login or use a different email address.")]
    EmailTaken,
}

impl AuthError {
    /// Page the client should be redirected to after this failure.
    pub fn redirect_target(&self) -> &'static str {
        match self {
            AuthError::EmailTaken => REGISTER_PAGE,
            _ => LOGIN_PAGE,
        }
    }
}

/// Content store failures. The cause string is logged, never sent to clients.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),

    #[error("store write failed: {0}")]
    Write(String),

    /// Only produced by the user directory (duplicate email).
    #[error("conflicting record: {0}")]
    Conflict(String),
}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    // 401 Unauthorized (500 for token generation)
    #[error(transparent)]
    Auth(#[from] AuthError),

    // 404 Not Found
    #[error("post not found")]
    PostNotFound,

    // 500 Internal Server Error
    #[error(transparent)]
    Store(#[from] StoreError),

    // 400 Bad Request, field-level messages for re-display
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    // 500 Internal Server Error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }
}

/// Flattens `validator` output into the list of messages shown to the user.
/// Fields are visited in name order so the list is stable.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect()
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(validation_messages(&errors))
    }
}

/// Malformed bodies and mistyped fields are reported like any other
/// validation failure instead of axum's plain-text 422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::validation(rejection.body_text())
    }
}

/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Auth(AuthError::TokenGenerationError) => {
                tracing::error!("Session token could not be generated");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Sorry, something went wrong on the server." }),
                )
            }
            AppError::Auth(err) => {
                tracing::debug!("Authentication failed: {}", err);
                (
                    StatusCode::UNAUTHORIZED,
                    json!({
                        "error": err.to_string(),
                        "redirect": err.redirect_target(),
                    }),
                )
            }
            AppError::PostNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "No post with the requested ID available." }),
            ),
            AppError::Store(err) => {
                tracing::error!("Store Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Sorry, something went wrong on the server." }),
                )
            }
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            AppError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Sorry, something went wrong on the server." }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
