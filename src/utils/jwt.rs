// src/utils/jwt.rs

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AuthError};

/// Name of the cookie carrying the session token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Fixed validity window of a session token.
pub const SESSION_TTL_MINUTES: i64 = 45;

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject - Stores the User ID.
    pub sub: String,
    /// Issued-at as Unix timestamp.
    pub iat: i64,
    /// Expiration time as Unix timestamp (`iat` + 45 min).
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Issues and validates stateless session tokens.
///
/// The signing secret is shared read-only; there is no revocation list, so a
/// token stays valid for its whole window even after the client logs out.
#[derive(Clone)]
pub struct SessionManager {
    secret: String,
}

impl SessionManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn issue(&self, user_id: &str) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Signs a token for `user_id` valid from `now` for 45 minutes.
    pub fn issue_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        if self.secret.is_empty() {
            tracing::error!("Cannot sign session token: JWT_SECRET is not set");
            return Err(AuthError::TokenGenerationError);
        }

        let issued_at = now.timestamp();
        let claims = Claims {
            sub: user_id.to_owned(),
            iat: issued_at,
            exp: (now + Duration::minutes(SESSION_TTL_MINUTES)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!("Failed to sign session token: {}", e);
            AuthError::TokenGenerationError
        })
    }

    pub fn validate(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Verifies signature first, then expiry against `now`.
    ///
    /// A correctly signed token past its window is always `ExpiredToken`.
    pub fn validate_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let token = match token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::MissingToken),
        };

        if self.secret.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        // Expiry is checked below with our own clock and no leeway.
        let mut validation = Validation::default();
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AuthError::InvalidToken)?;

        if now.timestamp() >= token_data.claims.exp {
            return Err(AuthError::ExpiredToken);
        }

        Ok(token_data.claims)
    }
}

/// Builds the `access_token` cookie: HTTP-only, strict same-site.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .build()
}

/// Drops the session cookie from the client. The token itself stays valid.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
}

/// Axum Middleware: Authentication.
///
/// Reads the `access_token` cookie. If valid, injects `Claims` into the
/// request extensions for handlers to use; otherwise short-circuits with an
/// authentication failure carrying a redirect to the login page.
pub async fn auth_middleware(
    State(sessions): State<SessionManager>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value());

    match sessions.validate(token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(err) => {
            tracing::info!("Rejected request to {}: {}", req.uri().path(), err);
            Err(err.into())
        }
    }
}
