//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement. Keys are opaque strings composed by [`crate::keys`].

use async_trait::async_trait;
use kino_core::models::VideoResource;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store failed: {0}")]
    StoreFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (local filesystem, in-memory) must implement this
/// trait. The media resource gateway works with any backend without coupling
/// to implementation details.
///
/// **Key format:** `{video_id}/{media_type}` — see [`crate::keys`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist a resource under the given key, overwriting any previous
    /// object at that key.
    async fn store(&self, key: &str, resource: &VideoResource) -> StorageResult<()>;

    /// Retrieve a resource by key; `None` when the key does not exist.
    async fn get(&self, key: &str) -> StorageResult<Option<VideoResource>>;

    /// List all keys starting with the given prefix.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Delete every listed key; keys that do not exist are ignored.
    async fn delete_all(&self, keys: &[String]) -> StorageResult<()>;
}
