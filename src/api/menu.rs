//! Menu API handlers
//!
//! POST /api/menu is a multipart form: text fields plus one image file.
//! The image is validated by filename extension, sanitized, and written to
//! the image directory before the row insert.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use http::StatusCode;
use serde::Serialize;

use crate::db;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Allowed upload extensions. Checked against the client filename, never
/// the declared content-type.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// URL prefix the static-file service exposes the image directory under.
pub const IMAGE_URL_PREFIX: &str = "/static/images";

#[derive(Debug, Serialize)]
pub struct MenuItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: String,
}

impl From<db::menu::MenuItem> for MenuItemResponse {
    fn from(item: db::menu::MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category,
            image_url: format!("{IMAGE_URL_PREFIX}/{}", item.image),
        }
    }
}

/// GET /api/menu
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MenuItemResponse>>> {
    let items = db::menu::list(&state.pool)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// GET /api/categories
pub async fn categories(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let categories = db::menu::list_categories(&state.pool)
        .await
        .map_err(AppError::internal)?;
    Ok(Json(categories))
}

/// Collected multipart form for menu creation.
#[derive(Default)]
struct CreateForm {
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    category: Option<String>,
    image_filename: Option<String>,
    image_data: Option<Vec<u8>>,
}

/// POST /api/menu
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let mut form = CreateForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };
        match name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "price" => form.price = Some(read_text(field).await?),
            "category" => form.category = Some(read_text(field).await?),
            "image" => {
                form.image_filename = field.file_name().map(|s| s.to_string());
                form.image_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let name = require_field(form.name, "name")?;
    let description = require_field(form.description, "description")?;
    let price_raw = require_field(form.price, "price")?;
    let category = require_field(form.category, "category")?;
    let image_data = form
        .image_data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::validation("Missing required fields"))?;

    let price: f64 = price_raw
        .parse()
        .map_err(|_| AppError::validation("Price must be a number"))?;
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("Price must be non-negative"));
    }

    let original_filename = form.image_filename.unwrap_or_default();
    let ext = crate::util::file_extension(&original_filename).unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::invalid_file_type(
            "Invalid file type or missing image",
        ));
    }

    let filename = crate::util::sanitize_filename(&original_filename)
        .ok_or_else(|| AppError::invalid_file_type("Invalid file type or missing image"))?;

    let path = state.config.image_dir().join(&filename);
    tokio::fs::write(&path, &image_data)
        .await
        .map_err(AppError::internal)?;

    let item =
        match db::menu::insert(&state.pool, &name, &description, price, &category, &filename)
            .await
        {
            Ok(item) => item,
            Err(e) => {
                // The file went down before the insert; don't leave it orphaned.
                let _ = tokio::fs::remove_file(&path).await;
                return Err(AppError::internal(e));
            }
        };

    tracing::info!(id = item.id, name = %item.name, "Menu item created");

    let body = serde_json::json!({
        "message": "Menu item created successfully",
        "new_item": MenuItemResponse::from(item),
    });
    Ok((StatusCode::CREATED, Json(body)))
}

/// DELETE /api/menu/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = db::menu::delete(&state.pool, id)
        .await
        .map_err(AppError::internal)?;
    if !deleted {
        return Err(AppError::not_found("Menu item"));
    }

    tracing::info!(id, "Menu item deleted");
    Ok(Json(serde_json::json!({
        "message": "Menu item deleted successfully"
    })))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}

fn require_field(value: Option<String>, _name: &str) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation("Missing required fields"))
}
