//! Media resource gateway.
//!
//! Bridges raw upload payloads and the aggregate's media value objects: a
//! stored resource becomes an [`AudioVideoMedia`] or [`ImageMedia`] whose
//! location is the deterministic storage key and whose checksum is the
//! SHA-256 digest of the content.

use std::sync::Arc;

use kino_core::ids::VideoId;
use kino_core::models::{AudioVideoMedia, ImageMedia, VideoMediaType, VideoResource};
use sha2::{Digest, Sha256};

use crate::keys::{media_key, video_prefix};
use crate::traits::{Storage, StorageResult};

#[derive(Clone)]
pub struct MediaResourceGateway {
    storage: Arc<dyn Storage>,
}

impl MediaResourceGateway {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Persist an audio/video resource (main feature or trailer) and return
    /// the pending media value object pointing at its raw location.
    pub async fn store_audio_video(
        &self,
        video_id: &VideoId,
        media_type: VideoMediaType,
        resource: &VideoResource,
    ) -> StorageResult<AudioVideoMedia> {
        let key = media_key(video_id, media_type);
        self.storage.store(&key, resource).await?;
        Ok(AudioVideoMedia::pending(
            checksum(resource),
            resource.name.clone(),
            key,
        ))
    }

    /// Persist an image resource (banner, thumbnail, half-thumbnail) and
    /// return its media value object.
    pub async fn store_image(
        &self,
        video_id: &VideoId,
        media_type: VideoMediaType,
        resource: &VideoResource,
    ) -> StorageResult<ImageMedia> {
        let key = media_key(video_id, media_type);
        self.storage.store(&key, resource).await?;
        Ok(ImageMedia::with(
            checksum(resource),
            resource.name.clone(),
            key,
        ))
    }

    /// Compensating action for a failed create: delete every resource stored
    /// for the video. Safe only when nothing for the video pre-existed.
    pub async fn clear_resources(&self, video_id: &VideoId) -> StorageResult<()> {
        let keys = self.storage.list(&video_prefix(video_id)).await?;
        if keys.is_empty() {
            return Ok(());
        }
        tracing::info!(
            video_id = %video_id,
            keys = keys.len(),
            "Clearing stored resources"
        );
        self.storage.delete_all(&keys).await
    }

    /// Compensating action scoped to one mutation: delete exactly the listed
    /// keys, leaving resources stored by earlier operations untouched.
    pub async fn remove_resources(&self, keys: &[String]) -> StorageResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        tracing::info!(keys = keys.len(), "Removing stored resources");
        self.storage.delete_all(keys).await
    }
}

/// SHA-256 hex digest of the resource content.
pub fn checksum(resource: &VideoResource) -> String {
    let mut hasher = Sha256::new();
    hasher.update(&resource.content);
    hex::encode(hasher.finalize())
}
