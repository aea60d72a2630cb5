//! Shared key generation for storage backends.
//!
//! Key format: `{video_id}/{media_type}`. The key space is partitioned
//! deterministically by video, so concurrent uploads for different videos
//! never collide; `video_prefix` covers every key belonging to one video for
//! the compensating cleanup.

use kino_core::ids::VideoId;
use kino_core::models::VideoMediaType;

/// Storage key for one media slot of one video.
pub fn media_key(video_id: &VideoId, media_type: VideoMediaType) -> String {
    format!("{}/{}", video_id, media_type)
}

/// Prefix covering all media keys of one video.
pub fn video_prefix(video_id: &VideoId) -> String {
    format!("{}/", video_id)
}
