//! Blob storage for video media resources.
//!
//! Defines the [`Storage`] trait all backends implement, the deterministic
//! key layout partitioning the key space by `(video_id, media_type)`, and the
//! [`MediaResourceGateway`] that turns raw uploads into media value objects.

pub mod keys;
pub mod local;
pub mod media_resources;
pub mod memory;
pub mod traits;

pub use keys::{media_key, video_prefix};
pub use local::LocalStorage;
pub use media_resources::MediaResourceGateway;
pub use memory::InMemoryStorage;
pub use traits::{Storage, StorageError, StorageResult};
