//! In-memory test doubles for the collaborator traits.
//!
//! These mocks allow testing the use cases without a database, blob store, or
//! message broker. They are also used by the worker crate's tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kino_core::models::Video;
use kino_core::{AppError, EventPublisher, ExistenceGateway, VideoEvent, VideoId, VideoRepository};

/// Mock video repository backed by a shared map.
#[derive(Clone, Default)]
pub struct MockVideoRepository {
    videos: Arc<Mutex<HashMap<String, Video>>>,
    fail_on_create: Arc<AtomicBool>,
    fail_on_update: Arc<AtomicBool>,
    create_calls: Arc<AtomicUsize>,
    update_calls: Arc<AtomicUsize>,
}

impl MockVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing aggregate.
    pub fn insert(&self, video: Video) {
        self.videos
            .lock()
            .unwrap()
            .insert(video.id().as_str().to_string(), video);
    }

    pub fn get(&self, id: &VideoId) -> Option<Video> {
        self.videos.lock().unwrap().get(id.as_str()).cloned()
    }

    pub fn fail_on_create(&self) {
        self.fail_on_create.store(true, Ordering::SeqCst);
    }

    pub fn fail_on_update(&self) {
        self.fail_on_update.store(true, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoRepository for MockVideoRepository {
    async fn create(&self, video: &Video) -> Result<Video, AppError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_create.load(Ordering::SeqCst) {
            return Err(AppError::Database("simulated create failure".to_string()));
        }
        self.insert(video.clone());
        Ok(video.clone())
    }

    async fn update(&self, video: &Video) -> Result<Video, AppError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_update.load(Ordering::SeqCst) {
            return Err(AppError::Database("simulated update failure".to_string()));
        }
        let mut videos = self.videos.lock().unwrap();
        if !videos.contains_key(video.id().as_str()) {
            return Err(AppError::NotFound(format!(
                "Video with ID {} was not found",
                video.id()
            )));
        }
        videos.insert(video.id().as_str().to_string(), video.clone());
        Ok(video.clone())
    }

    async fn find_by_id(&self, id: &VideoId) -> Result<Option<Video>, AppError> {
        Ok(self.videos.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn delete_by_id(&self, id: &VideoId) -> Result<(), AppError> {
        self.videos.lock().unwrap().remove(id.as_str());
        Ok(())
    }
}

/// Mock existence gateway returning a configured subset as existing.
///
/// Found IDs are returned in the gateway's own (configured) order, which may
/// differ from the requested order — the validator must not rely on it.
#[derive(Clone)]
pub struct MockExistenceGateway<I> {
    existing: Arc<Mutex<Vec<I>>>,
    calls: Arc<AtomicUsize>,
}

impl<I: Clone + PartialEq> MockExistenceGateway<I> {
    pub fn with_existing(existing: Vec<I>) -> Self {
        Self {
            existing: Arc::new(Mutex::new(existing)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<I> ExistenceGateway<I> for MockExistenceGateway<I>
where
    I: Clone + PartialEq + Send + Sync,
{
    async fn exists_by_ids(&self, ids: &[I]) -> Result<Vec<I>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .existing
            .lock()
            .unwrap()
            .iter()
            .filter(|id| ids.contains(id))
            .cloned()
            .collect())
    }
}

/// Mock event publisher recording every published event.
#[derive(Clone, Default)]
pub struct MockEventPublisher {
    events: Arc<Mutex<Vec<VideoEvent>>>,
    fail: Arc<AtomicBool>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on_publish(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn published(&self) -> Vec<VideoEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: VideoEvent) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal("simulated publish failure".to_string()));
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}
