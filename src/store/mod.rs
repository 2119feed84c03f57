//! Storage backends for comments.
//!
//! Handlers only see [`CommentStore`]; the concrete backend is picked once at
//! start-up by [`open`].

mod memory;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    config::StorageConfig,
    models::comments::{Comment, CommentFields},
};

pub use self::{memory::MemoryStore, sqlite::SqliteStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No such comment")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Stores a new comment, assigning its id and creation time.
    async fn create(&self, fields: CommentFields) -> Result<Comment>;

    /// All comments, newest first.
    async fn list(&self) -> Result<Vec<Comment>>;

    async fn get(&self, id: &str) -> Result<Comment>;

    /// Replaces the editable fields and keeps `id` and `created`.
    async fn update(&self, id: &str, fields: CommentFields) -> Result<Comment>;

    async fn delete(&self, id: &str) -> Result<()>;
}

pub fn open(config: &StorageConfig) -> anyhow::Result<Arc<dyn CommentStore>> {
    match config {
        StorageConfig::Memory => {
            tracing::info!("Using in-memory comment store");
            Ok(Arc::new(MemoryStore::default()))
        }
        StorageConfig::Sqlite { url, pool_size } => {
            tracing::info!(url = %url, pool_size, "Using SQLite comment store");
            Ok(Arc::new(SqliteStore::connect(url, *pool_size)?))
        }
    }
}
