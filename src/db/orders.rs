//! Order queries
//!
//! Order creation is the one multi-step write in the system: the order row
//! and its lines go through a single transaction so a failing or rejected
//! request leaves nothing behind.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::SqlitePool;

use super::BoxError;
use crate::util::now_millis;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";

/// One (menu item, quantity) pairing within an order request.
#[derive(Debug, Clone, Copy)]
pub struct LineInput {
    pub menu_item_id: i64,
    pub quantity: i64,
}

/// Outcome of a creation attempt. Referencing an absent menu item rolls the
/// whole transaction back.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(i64),
    UnknownMenuItem(i64),
}

pub async fn create(
    pool: &SqlitePool,
    customer_name: &str,
    table_number: i64,
    observation: Option<&str>,
    items: &[LineInput],
) -> Result<CreateOutcome, BoxError> {
    let mut tx = pool.begin().await?;

    let (order_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO orders (customer_name, table_number, observation, status, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(customer_name)
    .bind(table_number)
    .bind(observation)
    .bind(STATUS_PENDING)
    .bind(now_millis())
    .fetch_one(&mut *tx)
    .await?;

    for line in items {
        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM menu_items WHERE id = ?")
            .bind(line.menu_item_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            tx.rollback().await?;
            return Ok(CreateOutcome::UnknownMenuItem(line.menu_item_id));
        }

        sqlx::query("INSERT INTO order_items (order_id, menu_item_id, quantity) VALUES (?, ?, ?)")
            .bind(order_id)
            .bind(line.menu_item_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(CreateOutcome::Created(order_id))
}

/// Set status to completed. Returns whether an order with that id existed;
/// completing an already-completed order matches the row and is a no-op.
pub async fn mark_completed(pool: &SqlitePool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
        .bind(STATUS_COMPLETED)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ── Read-side projections ──

/// Expanded order line. Totals are computed at read time against current
/// menu prices, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLine {
    pub menu_item_name: String,
    pub quantity: i64,
    pub price: f64,
    pub total_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    pub id: i64,
    pub customer_name: String,
    pub table_number: i64,
    pub observation: Option<String>,
    pub status: String,
    pub items: Vec<OrderLine>,
    pub total_order_price: f64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub id: i64,
    pub customer_name: String,
    pub table_number: i64,
    pub status: String,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    table_number: i64,
    observation: Option<String>,
    status: String,
}

#[derive(sqlx::FromRow)]
struct LineRow {
    order_id: i64,
    quantity: i64,
    // NULL when the referenced menu item is gone; cascades make that
    // unreachable, but the projection degrades by omitting the line.
    menu_item_name: Option<String>,
    price: Option<f64>,
}

/// All orders with the given status, each with its lines expanded.
pub async fn list_with_items(
    pool: &SqlitePool,
    status: &str,
) -> Result<Vec<OrderWithItems>, BoxError> {
    let orders: Vec<OrderRow> = sqlx::query_as(
        r#"
        SELECT id, customer_name, table_number, observation, status
        FROM orders
        WHERE status = ?
        ORDER BY id
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await?;

    let lines: Vec<LineRow> = sqlx::query_as(
        r#"
        SELECT oi.order_id, oi.quantity, m.name AS menu_item_name, m.price
        FROM order_items oi
        JOIN orders o ON o.id = oi.order_id
        LEFT JOIN menu_items m ON m.id = oi.menu_item_id
        WHERE o.status = ?
        ORDER BY oi.id
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await?;

    let mut line_map: HashMap<i64, Vec<OrderLine>> = HashMap::new();
    for row in lines {
        let (Some(name), Some(price)) = (row.menu_item_name, row.price) else {
            continue;
        };
        line_map.entry(row.order_id).or_default().push(OrderLine {
            menu_item_name: name,
            quantity: row.quantity,
            price,
            total_price: price * row.quantity as f64,
        });
    }

    Ok(orders
        .into_iter()
        .map(|o| {
            let items = line_map.remove(&o.id).unwrap_or_default();
            let total_order_price = items.iter().map(|l| l.total_price).sum();
            OrderWithItems {
                id: o.id,
                customer_name: o.customer_name,
                table_number: o.table_number,
                observation: o.observation,
                status: o.status,
                items,
                total_order_price,
            }
        })
        .collect())
}

/// Condensed projection without lines or totals.
pub async fn list_summaries(
    pool: &SqlitePool,
    status: &str,
) -> Result<Vec<OrderSummary>, BoxError> {
    let summaries = sqlx::query_as(
        "SELECT id, customer_name, table_number, status FROM orders WHERE status = ? ORDER BY id",
    )
    .bind(status)
    .fetch_all(pool)
    .await?;
    Ok(summaries)
}
