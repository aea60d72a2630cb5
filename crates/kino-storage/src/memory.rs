//! In-memory storage backend.
//!
//! Backs unit tests and local development; the map is shared across clones so
//! a service under test and the assertions see the same state.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use kino_core::models::VideoResource;

use crate::traits::{Storage, StorageError, StorageResult};

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    objects: Arc<RwLock<BTreeMap<String, VideoResource>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored keys, in sorted order. Test helper.
    pub fn stored_keys(&self) -> Vec<String> {
        self.objects.read().unwrap().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().unwrap().is_empty()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn store(&self, key: &str, resource: &VideoResource) -> StorageResult<()> {
        self.objects
            .write()
            .map_err(|e| StorageError::BackendError(format!("lock poisoned: {}", e)))?
            .insert(key.to_string(), resource.clone());
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<VideoResource>> {
        Ok(self
            .objects
            .read()
            .map_err(|e| StorageError::BackendError(format!("lock poisoned: {}", e)))?
            .get(key)
            .cloned())
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        Ok(self
            .objects
            .read()
            .map_err(|e| StorageError::BackendError(format!("lock poisoned: {}", e)))?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete_all(&self, keys: &[String]) -> StorageResult<()> {
        let mut objects = self
            .objects
            .write()
            .map_err(|e| StorageError::BackendError(format!("lock poisoned: {}", e)))?;
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str) -> VideoResource {
        VideoResource::new(name.as_bytes().to_vec(), "video/mp4", name.to_string())
    }

    #[tokio::test]
    async fn store_get_round_trip() {
        let storage = InMemoryStorage::new();
        storage.store("v-1/video", &resource("movie.mp4")).await.unwrap();

        let found = storage.get("v-1/video").await.unwrap().unwrap();
        assert_eq!(found.name, "movie.mp4");
        assert!(storage.get("v-1/trailer").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_by_prefix() {
        let storage = InMemoryStorage::new();
        storage.store("v-1/video", &resource("a")).await.unwrap();
        storage.store("v-1/banner", &resource("b")).await.unwrap();
        storage.store("v-2/video", &resource("c")).await.unwrap();

        let keys = storage.list("v-1/").await.unwrap();
        assert_eq!(keys, ["v-1/banner", "v-1/video"]);
    }

    #[tokio::test]
    async fn delete_all_removes_listed_keys_and_ignores_missing_ones() {
        let storage = InMemoryStorage::new();
        storage.store("v-1/video", &resource("a")).await.unwrap();
        storage.store("v-1/banner", &resource("b")).await.unwrap();

        storage
            .delete_all(&[
                "v-1/video".to_string(),
                "v-1/banner".to_string(),
                "v-1/missing".to_string(),
            ])
            .await
            .unwrap();

        assert!(storage.is_empty());
    }
}
