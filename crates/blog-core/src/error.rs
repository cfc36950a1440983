//! Error types for the blog

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlogError>;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Post not found: {0}")]
    PostNotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl BlogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlogError::PostNotFound(_))
    }
}
