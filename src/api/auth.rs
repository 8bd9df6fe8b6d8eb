//! Authentication endpoints: login, logout

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use http::HeaderMap;
use http::header::SET_COOKIE;
use serde::Deserialize;

use crate::auth::{CurrentAdmin, SESSION_COOKIE};
use crate::db;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<(HeaderMap, Json<serde_json::Value>)> {
    let Json(req) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    let admin = db::admins::find_by_username(&state.pool, &req.username)
        .await
        .map_err(AppError::internal)?;

    // Unified failure path: unknown user and bad password are
    // indistinguishable to the client.
    let admin = match admin {
        Some(a) if crate::util::verify_password(&req.password, &a.password_hash) => a,
        _ => {
            tracing::warn!(username = %req.username, "Login failed");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state.sessions.create(admin.id, &admin.username);
    tracing::info!(admin_id = admin.id, username = %admin.username, "Administrator logged in");

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        session_cookie(&token, state.config.cookie_secure)
            .parse()
            .map_err(AppError::internal)?,
    );

    Ok((headers, Json(serde_json::json!({ "message": "Login successful" }))))
}

/// GET /api/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> AppResult<(HeaderMap, Json<serde_json::Value>)> {
    state.sessions.remove(&admin.token);
    tracing::info!(admin_id = admin.id, username = %admin.username, "Administrator logged out");

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        expired_cookie(state.config.cookie_secure)
            .parse()
            .map_err(AppError::internal)?,
    );

    Ok((
        headers,
        Json(serde_json::json!({ "message": "Logged out successfully." })),
    ))
}

/// Cross-site frontends need SameSite=None, which browsers only accept
/// together with Secure.
fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=None");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn expired_cookie(secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=None; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok123", true);
        assert!(cookie.starts_with("comanda_session=tok123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=None"));
        assert!(cookie.ends_with("Secure"));

        let insecure = session_cookie("tok123", false);
        assert!(!insecure.contains("Secure"));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_cookie(false);
        assert!(cookie.starts_with("comanda_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
