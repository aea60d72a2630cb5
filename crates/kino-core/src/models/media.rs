//! Media value objects owned by the [`super::video::Video`] aggregate.
//!
//! `ImageMedia` and `AudioVideoMedia` are immutable; the aggregate replaces a
//! whole slot rather than mutating a value in place. Equality and hashing are
//! defined over the raw-identity fields only (`checksum` plus location),
//! excluding fields that change over time (`status`, `encoded_location`) and
//! the display `name` — two uploads with identical content and location are
//! the same media regardless of what the client called the file.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::ids::MediaId;

/// Encoding lifecycle of an audio/video media asset.
///
/// `Pending` on first upload; the external encoder drives the remaining
/// transitions through out-of-band callbacks. There is no transition back to
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl Display for MediaStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaStatus::Pending => write!(f, "pending"),
            MediaStatus::Processing => write!(f, "processing"),
            MediaStatus::Completed => write!(f, "completed"),
            MediaStatus::Error => write!(f, "error"),
        }
    }
}

/// The five named attachment points on a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoMediaType {
    Video,
    Trailer,
    Banner,
    Thumbnail,
    ThumbnailHalf,
}

impl VideoMediaType {
    pub const ALL: [VideoMediaType; 5] = [
        VideoMediaType::Video,
        VideoMediaType::Trailer,
        VideoMediaType::Banner,
        VideoMediaType::Thumbnail,
        VideoMediaType::ThumbnailHalf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoMediaType::Video => "video",
            VideoMediaType::Trailer => "trailer",
            VideoMediaType::Banner => "banner",
            VideoMediaType::Thumbnail => "thumbnail",
            VideoMediaType::ThumbnailHalf => "thumbnail_half",
        }
    }

    /// Resolve a slot label, the inverse of [`Self::as_str`].
    pub fn of(label: &str) -> Option<VideoMediaType> {
        Self::ALL.iter().find(|t| t.as_str() == label).copied()
    }
}

impl Display for VideoMediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Raw upload payload for one media slot: content bytes plus the declared
/// content type and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoResource {
    pub content: Bytes,
    pub content_type: String,
    pub name: String,
}

impl VideoResource {
    pub fn new(content: impl Into<Bytes>, content_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.into(),
            name: name.into(),
        }
    }
}

/// Immutable image attachment (banner, thumbnail, half-thumbnail).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMedia {
    checksum: String,
    name: String,
    location: String,
}

impl ImageMedia {
    pub fn with(
        checksum: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            checksum: checksum.into(),
            name: name.into(),
            location: location.into(),
        }
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

// De-duplication rule: identity is (checksum, location) only.
impl PartialEq for ImageMedia {
    fn eq(&self, other: &Self) -> bool {
        self.checksum == other.checksum && self.location == other.location
    }
}

impl Eq for ImageMedia {}

impl Hash for ImageMedia {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.checksum.hash(state);
        self.location.hash(state);
    }
}

/// Immutable audio/video attachment (main feature, trailer) carrying the
/// encoding state machine.
///
/// `encoded_location` stays empty until the encoder reports completion; "no
/// media" is an empty slot on the aggregate, never a null-status value here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioVideoMedia {
    id: MediaId,
    checksum: String,
    name: String,
    raw_location: String,
    encoded_location: String,
    status: MediaStatus,
}

impl AudioVideoMedia {
    /// Full constructor; generates a fresh media id.
    pub fn with(
        checksum: impl Into<String>,
        name: impl Into<String>,
        raw_location: impl Into<String>,
        encoded_location: impl Into<String>,
        status: MediaStatus,
    ) -> Self {
        Self {
            id: MediaId::new(),
            checksum: checksum.into(),
            name: name.into(),
            raw_location: raw_location.into(),
            encoded_location: encoded_location.into(),
            status,
        }
    }

    /// Initial state on first upload: `Pending` with no encoded location yet.
    pub fn pending(
        checksum: impl Into<String>,
        name: impl Into<String>,
        raw_location: impl Into<String>,
    ) -> Self {
        Self::with(checksum, name, raw_location, "", MediaStatus::Pending)
    }

    pub fn id(&self) -> &MediaId {
        &self.id
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_location(&self) -> &str {
        &self.raw_location
    }

    pub fn encoded_location(&self) -> &str {
        &self.encoded_location
    }

    pub fn status(&self) -> MediaStatus {
        self.status
    }

    /// Encoder picked the asset up; the encoded location stays empty.
    pub fn processing(&self) -> Self {
        Self {
            status: MediaStatus::Processing,
            ..self.clone()
        }
    }

    /// Encoder finished; records where the encoded rendition lives.
    pub fn completed(&self, encoded_location: impl Into<String>) -> Self {
        Self {
            status: MediaStatus::Completed,
            encoded_location: encoded_location.into(),
            ..self.clone()
        }
    }

    /// Encoder reported a failure.
    pub fn errored(&self) -> Self {
        Self {
            status: MediaStatus::Error,
            ..self.clone()
        }
    }
}

// Identity is (checksum, raw_location); status, encoded_location, name and id
// are excluded from both equality and hashing.
impl PartialEq for AudioVideoMedia {
    fn eq(&self, other: &Self) -> bool {
        self.checksum == other.checksum && self.raw_location == other.raw_location
    }
}

impl Eq for AudioVideoMedia {}

impl Hash for AudioVideoMedia {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.checksum.hash(state);
        self.raw_location.hash(state);
    }
}
