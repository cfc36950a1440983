//! Blog Core Library
//!
//! Domain types, validation rules and the storage port for the blog server.

pub mod error;
pub mod ports;
pub mod post;

pub use error::{BlogError, Result};
pub use ports::PostStore;
pub use post::{Post, PostDraft, ValidDraft};
