//! Storage traits for persistence

use crate::{Post, Result, ValidDraft};
use async_trait::async_trait;

/// Post store
///
/// Every method is a single statement against the backing store.
/// `fetch_one` reports a missing row as [`crate::BlogError::PostNotFound`].
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Post>>;
    async fn fetch_one(&self, id: i64) -> Result<Post>;
    async fn insert(&self, draft: &ValidDraft) -> Result<i64>;
    async fn update(&self, id: i64, draft: &ValidDraft) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}
