//! Server configuration

use crate::BoxError;

/// Server configuration, sourced from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Directory served under /static; uploaded images go to images/ inside it
    pub static_dir: String,
    /// Frontend origin allowed by CORS (credentials included)
    pub frontend_origin: String,
    /// Whether the session cookie carries the Secure attribute
    pub cookie_secure: bool,
    /// Session lifetime in hours
    pub session_ttl_hours: i64,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Seed administrator credentials (created at startup when absent)
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let admin_username = std::env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty());
        let admin_password = std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty());

        // Seeding with a blank password outside development is a misconfiguration,
        // not a fallback.
        if environment != "development" && admin_username.is_some() && admin_password.is_none() {
            return Err(
                format!("ADMIN_PASSWORD must be set in {environment} environment").into(),
            );
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:comanda.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()),
            frontend_origin: std::env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://127.0.0.1:3000".into()),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            session_ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            admin_username,
            admin_password,
            environment,
        })
    }

    /// Filesystem directory where uploaded menu images are stored.
    pub fn image_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.static_dir).join("images")
    }
}
