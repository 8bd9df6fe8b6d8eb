//! API routes
//!
//! Two route groups: public (menu reads, menu creation, order placement,
//! login) and protected (everything an administrator does), the latter
//! behind the session gate. Static images are served under /static.

pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;

use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::{Router, middleware};
use http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::BoxError;
use crate::auth::require_session;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Result<Router, BoxError> {
    let public = Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/menu", get(menu::list).post(menu::create))
        .route("/api/categories", get(menu::categories))
        .route("/api/orders", post(orders::create));

    // Session gate applied per-route so it survives the merge with the
    // public group sharing /api/orders.
    let protected = Router::new()
        .route("/api/logout", get(auth::logout))
        .route("/api/menu/{id}", delete(menu::delete))
        .route("/api/orders", get(orders::list_pending))
        .route("/api/orders/{id}/complete", post(orders::complete))
        .route("/api/history", get(orders::history))
        .route("/api/orders/history", get(orders::condensed_history))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let cors = CorsLayer::new()
        .allow_origin(state.config.frontend_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let app = Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(protected)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.request_timeout_secs,
        )))
        .layer(cors)
        .with_state(state);

    Ok(app)
}
