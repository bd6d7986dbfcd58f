// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Value of `DATABASE_URL` that selects the in-process store.
pub const MEMORY_DATABASE: &str = "memory";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Session signing secret. Empty means token issuance is disabled.
    pub jwt_secret: String,
    pub rust_log: String,
    pub bind_addr: String,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_default();

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Ok(Self {
            database_url,
            jwt_secret,
            rust_log,
            bind_addr,
            cookie_secure,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE
    }
}
