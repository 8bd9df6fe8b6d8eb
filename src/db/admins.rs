//! Administrator queries
//!
//! Admins are created out-of-band (startup seed); no endpoint mutates them.

use sqlx::SqlitePool;

use super::BoxError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<Admin>, BoxError> {
    let admin = sqlx::query_as(
        "SELECT id, username, password_hash FROM admins WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(admin)
}

/// Insert the administrator if the username is absent. Returns whether a row
/// was created.
pub async fn seed(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<bool, BoxError> {
    let result = sqlx::query(
        "INSERT INTO admins (username, password_hash) VALUES (?, ?) ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(password_hash)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
