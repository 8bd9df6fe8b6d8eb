//! comanda-server — restaurant order-management backend
//!
//! Thin HTTP/JSON layer over a relational schema:
//! - Menu CRUD with image upload, served as static files
//! - Customer order placement, pending list, one-way completion, history
//! - Single administrator role behind cookie-backed sessions

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod state;
pub mod util;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
