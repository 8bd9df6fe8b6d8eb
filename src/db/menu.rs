//! Menu item queries

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::BoxError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    /// Sanitized filename under the image directory
    pub image: String,
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<MenuItem>, BoxError> {
    let items = sqlx::query_as(
        "SELECT id, name, description, price, category, image FROM menu_items ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Distinct category labels currently in use, order unspecified.
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<String>, BoxError> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT DISTINCT category FROM menu_items")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(c,)| c).collect())
}

pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    image: &str,
) -> Result<MenuItem, BoxError> {
    let item = sqlx::query_as(
        r#"
        INSERT INTO menu_items (name, description, price, category, image)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, description, price, category, image
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(category)
    .bind(image)
    .fetch_one(pool)
    .await?;
    Ok(item)
}

/// Delete a menu item; order lines referencing it go with it via the
/// cascade. Returns whether a row existed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM menu_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
