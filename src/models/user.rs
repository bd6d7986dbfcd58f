// src/models/user.rs

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

const USERNAME_MAX_CHARS: usize = 50;
const PASSWORD_MAX_CHARS: usize = 128;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    pub display_name: String,

    /// Unique, stored lowercase.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password_hash: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Public view of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        let display_name = if user.display_name.is_empty() {
            user.email.clone()
        } else {
            user.display_name.clone()
        };

        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            display_name,
        }
    }
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Username is required"),
        custom(function = validate_username_max)
    )]
    pub username: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters long"),
        custom(function = validate_password_max)
    )]
    pub password: String,
}

impl RegisterRequest {
    pub fn trimmed(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password.trim().to_string(),
        }
    }
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters long"),
        custom(function = validate_password_max)
    )]
    pub password: String,
}

impl LoginRequest {
    pub fn trimmed(self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
            password: self.password.trim().to_string(),
        }
    }
}

/// Upper bound on display names. The lower bound is the `length` rule.
fn validate_username_max(username: &str) -> Result<(), ValidationError> {
    if username.chars().count() > USERNAME_MAX_CHARS {
        return Err(ValidationError::new("username_too_long")
            .with_message(Cow::Borrowed("Username must be at most 50 characters long")));
    }
    Ok(())
}

fn validate_password_max(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() > PASSWORD_MAX_CHARS {
        return Err(ValidationError::new("password_too_long")
            .with_message(Cow::Borrowed("Password must be at most 128 characters long")));
    }
    Ok(())
}
