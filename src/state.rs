//! Application state

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::BoxError;
use crate::auth::SessionStore;
use crate::config::Config;
use crate::db;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// In-process session store
    pub sessions: SessionStore,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState: connect, migrate, prepare the image directory,
    /// and seed the administrator when configured.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        std::fs::create_dir_all(config.image_dir())?;

        if let (Some(username), Some(password)) =
            (&config.admin_username, &config.admin_password)
        {
            let password_hash = crate::util::hash_password(password)
                .map_err(|e| format!("Failed to hash seed admin password: {e}"))?;
            if db::admins::seed(&pool, username, &password_hash).await? {
                tracing::info!(username = %username, "Seeded administrator account");
            }
        }

        Ok(Self {
            pool,
            sessions: SessionStore::new(config.session_ttl_hours),
            config: config.clone(),
        })
    }
}
