//! Local filesystem storage implementation.
//!
//! Each object is written to `{base_path}/{key}` with a `.meta` JSON sidecar
//! carrying the declared name and content type, so a stored resource can be
//! reconstructed in full on `get`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use kino_core::models::VideoResource;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{Storage, StorageError, StorageResult};

const META_SUFFIX: &str = ".meta";

#[derive(Debug, Serialize, Deserialize)]
struct ResourceMeta {
    name: String,
    content_type: String,
}

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at `base_path`, creating the
    /// directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a storage key to a filesystem path, rejecting keys that could
    /// escape the base directory.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(key))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Key for the entry at `path`, relative to the base directory.
    fn path_to_key(&self, path: &Path) -> Option<String> {
        path.strip_prefix(&self.base_path)
            .ok()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(&self, key: &str, resource: &VideoResource) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::StoreFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        file.write_all(&resource.content).await.map_err(|e| {
            StorageError::StoreFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::StoreFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let meta = ResourceMeta {
            name: resource.name.clone(),
            content_type: resource.content_type.clone(),
        };
        let meta_json = serde_json::to_vec(&meta)
            .map_err(|e| StorageError::StoreFailed(format!("Failed to encode metadata: {}", e)))?;
        let meta_path = PathBuf::from(format!("{}{}", path.display(), META_SUFFIX));
        fs::write(&meta_path, meta_json).await.map_err(|e| {
            StorageError::StoreFailed(format!(
                "Failed to write metadata {}: {}",
                meta_path.display(),
                e
            ))
        })?;

        tracing::info!(
            key = %key,
            size_bytes = resource.content.len(),
            "Local storage store successful"
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<VideoResource>> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }

        let content = fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let meta_path = PathBuf::from(format!("{}{}", path.display(), META_SUFFIX));
        let meta: ResourceMeta = match fs::read(&meta_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StorageError::ReadFailed(format!("Failed to decode metadata: {}", e))
            })?,
            Err(_) => ResourceMeta {
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                content_type: "application/octet-stream".to_string(),
            },
        };

        Ok(Some(VideoResource::new(
            content,
            meta.content_type,
            meta.name,
        )))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut pending = vec![self.base_path.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(_) => continue,
            };
            while let Some(entry) = entries.next_entry().await.map_err(|e| {
                StorageError::ReadFailed(format!("Failed to list {}: {}", dir.display(), e))
            })? {
                let path = entry.path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                if path.to_string_lossy().ends_with(META_SUFFIX) {
                    continue;
                }
                if let Some(key) = self.path_to_key(&path) {
                    if key.starts_with(prefix) {
                        keys.push(key);
                    }
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    async fn delete_all(&self, keys: &[String]) -> StorageResult<()> {
        for key in keys {
            let path = self.key_to_path(key)?;
            if fs::try_exists(&path).await.unwrap_or(false) {
                fs::remove_file(&path).await.map_err(|e| {
                    StorageError::DeleteFailed(format!(
                        "Failed to delete file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            }
            let meta_path = PathBuf::from(format!("{}{}", path.display(), META_SUFFIX));
            if fs::try_exists(&meta_path).await.unwrap_or(false) {
                fs::remove_file(&meta_path).await.map_err(|e| {
                    StorageError::DeleteFailed(format!(
                        "Failed to delete metadata {}: {}",
                        meta_path.display(),
                        e
                    ))
                })?;
            }
        }

        tracing::info!(deleted = keys.len(), "Local storage delete_all successful");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn resource(name: &str, content: &str) -> VideoResource {
        VideoResource::new(content.as_bytes().to_vec(), "video/mp4", name.to_string())
    }

    #[tokio::test]
    async fn store_get_round_trips_content_and_metadata() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage
            .store("v-1/video", &resource("movie.mp4", "raw bytes"))
            .await
            .unwrap();

        let found = storage.get("v-1/video").await.unwrap().unwrap();
        assert_eq!(&found.content[..], b"raw bytes");
        assert_eq!(found.name, "movie.mp4");
        assert_eq!(found.content_type, "video/mp4");
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        assert!(storage.get("v-1/video").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn path_traversal_is_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage.get("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage
            .store("/etc/passwd", &resource("x", "y"))
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn list_returns_only_keys_under_the_prefix() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage.store("v-1/video", &resource("a", "1")).await.unwrap();
        storage.store("v-1/banner", &resource("b", "2")).await.unwrap();
        storage.store("v-2/video", &resource("c", "3")).await.unwrap();

        let keys = storage.list("v-1/").await.unwrap();
        assert_eq!(keys, ["v-1/banner", "v-1/video"]);
    }

    #[tokio::test]
    async fn delete_all_removes_files_and_sidecars() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage.store("v-1/video", &resource("a", "1")).await.unwrap();
        storage.store("v-1/banner", &resource("b", "2")).await.unwrap();

        let keys = storage.list("v-1/").await.unwrap();
        storage.delete_all(&keys).await.unwrap();

        assert!(storage.list("v-1/").await.unwrap().is_empty());
        assert!(storage.get("v-1/video").await.unwrap().is_none());
    }
}
