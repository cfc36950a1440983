//! Handler error type and its HTTP mapping

use crate::views;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blog_core::BlogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Blog(#[from] BlogError),

    #[error("Not found")]
    NotFound,

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Blog(BlogError::PostNotFound(id)) => {
                tracing::debug!("Post {} not found", id);
                views::not_found()
            }
            AppError::NotFound => views::not_found(),
            other => {
                tracing::error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
