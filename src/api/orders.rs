//! Order API handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use http::StatusCode;
use serde::Deserialize;

use crate::db;
use crate::db::orders::{CreateOutcome, LineInput, STATUS_COMPLETED, STATUS_PENDING};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub table_number: i64,
    pub observation: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Deserialize)]
pub struct OrderItemRequest {
    #[serde(alias = "id")]
    pub menu_item_id: i64,
    pub quantity: i64,
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    // A malformed or incomplete body is a validation failure, same as a
    // present-but-empty field.
    let Json(req) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    if req.customer_name.trim().is_empty() || req.items.is_empty() {
        return Err(AppError::validation("Missing required fields"));
    }
    if req.table_number <= 0 {
        return Err(AppError::validation("Table number must be positive"));
    }
    if req.items.iter().any(|i| i.quantity <= 0) {
        return Err(AppError::validation("Quantity must be positive"));
    }

    let lines: Vec<LineInput> = req
        .items
        .iter()
        .map(|i| LineInput {
            menu_item_id: i.menu_item_id,
            quantity: i.quantity,
        })
        .collect();

    let outcome = db::orders::create(
        &state.pool,
        req.customer_name.trim(),
        req.table_number,
        req.observation.as_deref(),
        &lines,
    )
    .await
    .map_err(AppError::internal)?;

    let order_id = match outcome {
        CreateOutcome::Created(id) => id,
        CreateOutcome::UnknownMenuItem(id) => {
            return Err(AppError::not_found(format!("Menu item {id}")));
        }
    };

    tracing::info!(order_id, customer = %req.customer_name.trim(), "Order created");

    let body = serde_json::json!({
        "message": "Order created successfully",
        "order_id": order_id,
    });
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/orders — pending orders with expanded lines
pub async fn list_pending(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let orders = db::orders::list_with_items(&state.pool, STATUS_PENDING)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(serde_json::json!({ "orders": orders })))
}

/// POST /api/orders/{id}/complete
///
/// One-way transition; completing an already-completed order is a no-op
/// success.
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let found = db::orders::mark_completed(&state.pool, id)
        .await
        .map_err(AppError::internal)?;
    if !found {
        return Err(AppError::not_found("Order"));
    }

    tracing::info!(order_id = id, "Order completed");
    Ok(Json(serde_json::json!({
        "message": "Order completed successfully"
    })))
}

/// GET /api/history — completed orders with lines and totals
pub async fn history(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let orders = db::orders::list_with_items(&state.pool, STATUS_COMPLETED)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(serde_json::json!({ "orders": orders })))
}

/// GET /api/orders/history — condensed completed-order projection
pub async fn condensed_history(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let summaries = db::orders::list_summaries(&state.pool, STATUS_COMPLETED)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(serde_json::json!({ "history": summaries })))
}
