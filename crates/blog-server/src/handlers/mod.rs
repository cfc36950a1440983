//! HTTP handlers

pub mod health;
pub mod posts;

pub use health::health;

use crate::views;
use axum::response::Response;

/// Fallback for unmatched routes
pub async fn not_found() -> Response {
    views::not_found()
}
