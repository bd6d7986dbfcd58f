use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AuthError, StoreError},
    models::user::{LoginRequest, NewUser, RegisterRequest, User},
    store::UserDirectory,
    utils::{
        hash::{hash_password, verify_password},
        html::sanitize_field,
        jwt::{Claims, SessionManager},
    },
};

/// Registration, login and user lookup for authenticated requests.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserDirectory>,
    sessions: SessionManager,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserDirectory>, sessions: SessionManager) -> Self {
        Self { users, sessions }
    }

    /// Creates the user and mints a session token for them.
    pub async fn register(&self, request: RegisterRequest) -> Result<(User, String), AppError> {
        let request = request.trimmed();
        request.validate()?;

        let display_name = sanitize_field(&request.username);
        if display_name.is_empty() {
            return Err(AppError::validation("Username is required"));
        }

        let password_hash = hash_password(&request.password)?;

        let user = self
            .users
            .create_user(NewUser {
                display_name,
                email: request.email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AppError::Auth(AuthError::EmailTaken),
                other => AppError::Store(other),
            })?;

        tracing::info!(user_id = %user.id, "New user registered");

        let token = self.sessions.issue(&user.id)?;
        Ok((user, token))
    }

    /// Checks credentials and mints a session token.
    pub async fn login(&self, request: LoginRequest) -> Result<(User, String), AppError> {
        let request = request.trimmed();
        request.validate()?;

        let user = self
            .users
            .find_user_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.sessions.issue(&user.id)?;
        Ok((user, token))
    }

    /// Looks up the user behind a validated session.
    pub async fn resolve(&self, claims: &Claims) -> Result<User, AppError> {
        let user = self
            .users
            .find_user_by_id(claims.user_id())
            .await?
            .ok_or(AuthError::UnknownUser)?;
        Ok(user)
    }
}
