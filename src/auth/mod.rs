//! Session-cookie authentication gate
//!
//! Protected routes are wrapped by [`require_session`]; handlers behind it
//! receive the [`CurrentAdmin`] extension and never run without a valid
//! session.

pub mod session;

pub use session::{SESSION_COOKIE, Session, SessionStore};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Authenticated administrator identity for the current request.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: i64,
    pub username: String,
    /// Token backing this request, used by logout to terminate the session.
    pub token: String,
}

/// Middleware enforcing a valid session cookie on protected routes.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = request
        .headers()
        .get(http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(session_cookie_value)
        .ok_or_else(unauthorized_response)?;

    let session = state
        .sessions
        .get(&token)
        .ok_or_else(unauthorized_response)?;

    request.extensions_mut().insert(CurrentAdmin {
        id: session.admin_id,
        username: session.username,
        token,
    });

    Ok(next.run(request).await)
}

/// Extract the session token from a `Cookie` header value.
fn session_cookie_value(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

fn unauthorized_response() -> Response {
    crate::error::AppError::unauthorized().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_value() {
        assert_eq!(
            session_cookie_value("comanda_session=abc123").as_deref(),
            Some("abc123")
        );
        assert_eq!(
            session_cookie_value("theme=dark; comanda_session=tok; lang=pt").as_deref(),
            Some("tok")
        );
        assert_eq!(session_cookie_value("theme=dark"), None);
        assert_eq!(session_cookie_value(""), None);
    }
}
