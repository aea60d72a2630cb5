//! Collaborator contracts consumed by the orchestrating use cases.
//!
//! Implementations live in the infrastructure crates (`kino-db` for the
//! repository and existence gateways); the use cases only ever see these
//! traits, which keeps them testable with in-memory doubles.

use async_trait::async_trait;

use crate::error::AppError;
use crate::events::VideoEvent;
use crate::ids::VideoId;
use crate::models::video::Video;

/// Persistence contract for the Video aggregate.
///
/// Implementations must round-trip every aggregate field, including media
/// slots and association sets.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create(&self, video: &Video) -> Result<Video, AppError>;

    async fn update(&self, video: &Video) -> Result<Video, AppError>;

    async fn find_by_id(&self, id: &VideoId) -> Result<Option<Video>, AppError>;

    async fn delete_by_id(&self, id: &VideoId) -> Result<(), AppError>;
}

/// "Exists" lookup against another aggregate's store.
///
/// Returns the subset of `ids` that exist, in no guaranteed order; the caller
/// computes the missing set itself. One instance per foreign aggregate type
/// (categories, genres, cast members).
#[async_trait]
pub trait ExistenceGateway<I>: Send + Sync {
    async fn exists_by_ids(&self, ids: &[I]) -> Result<Vec<I>, AppError>;
}

/// Outbound notification channel toward the external encoder.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: VideoEvent) -> Result<(), AppError>;
}
