//! Domain models for the video catalog.

pub mod media;
pub mod rating;
pub mod video;

pub use media::{AudioVideoMedia, ImageMedia, MediaStatus, VideoMediaType, VideoResource};
pub use rating::Rating;
pub use video::Video;
