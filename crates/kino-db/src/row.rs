//! Row mapping between the `videos` table and the aggregate.
//!
//! The mapping is pure and bidirectional so it can be unit tested without a
//! database. Media value objects round-trip through JSONB columns; rating is
//! persisted by its external label.

use chrono::{DateTime, Utc};
use kino_core::ids::{CastMemberId, CategoryId, GenreId, VideoId};
use kino_core::models::{AudioVideoMedia, ImageMedia, Rating, Video};
use kino_core::AppError;
use serde_json::Value as JsonValue;

#[derive(Debug, sqlx::FromRow)]
pub struct VideoRow {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub launch_year: Option<i32>,
    pub duration: f64,
    pub rating: Option<String>,
    pub opened: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub video: Option<JsonValue>,
    pub trailer: Option<JsonValue>,
    pub banner: Option<JsonValue>,
    pub thumbnail: Option<JsonValue>,
    pub thumbnail_half: Option<JsonValue>,
    pub categories: Vec<String>,
    pub genres: Vec<String>,
    pub cast_members: Vec<String>,
}

fn parse_media<T: serde::de::DeserializeOwned>(
    column: &str,
    value: Option<JsonValue>,
) -> Result<Option<T>, AppError> {
    value
        .map(|v| {
            serde_json::from_value(v).map_err(|e| {
                AppError::Database(format!("Corrupt {} media column: {}", column, e))
            })
        })
        .transpose()
}

fn media_json<T: serde::Serialize>(media: Option<&T>) -> Result<Option<JsonValue>, AppError> {
    media
        .map(|m| {
            serde_json::to_value(m)
                .map_err(|e| AppError::Database(format!("Unserializable media value: {}", e)))
        })
        .transpose()
}

impl VideoRow {
    pub fn from_video(video: &Video) -> Result<Self, AppError> {
        Ok(Self {
            id: video.id().as_str().to_string(),
            title: video.title().map(str::to_string),
            description: video.description().map(str::to_string),
            launch_year: video.launch_year(),
            duration: video.duration(),
            rating: video.rating().map(|r| r.label().to_string()),
            opened: video.opened(),
            published: video.published(),
            created_at: video.created_at(),
            updated_at: video.updated_at(),
            video: media_json(video.video())?,
            trailer: media_json(video.trailer())?,
            banner: media_json(video.banner())?,
            thumbnail: media_json(video.thumbnail())?,
            thumbnail_half: media_json(video.thumbnail_half())?,
            categories: video.categories().iter().map(|c| c.as_str().to_string()).collect(),
            genres: video.genres().iter().map(|g| g.as_str().to_string()).collect(),
            cast_members: video
                .cast_members()
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
        })
    }

    pub fn into_video(self) -> Result<Video, AppError> {
        let video_media: Option<AudioVideoMedia> = parse_media("video", self.video)?;
        let trailer: Option<AudioVideoMedia> = parse_media("trailer", self.trailer)?;
        let banner: Option<ImageMedia> = parse_media("banner", self.banner)?;
        let thumbnail: Option<ImageMedia> = parse_media("thumbnail", self.thumbnail)?;
        let thumbnail_half: Option<ImageMedia> = parse_media("thumbnail_half", self.thumbnail_half)?;

        Ok(Video::with(
            VideoId::from(self.id),
            self.title,
            self.description,
            self.launch_year,
            self.duration,
            self.rating.as_deref().and_then(Rating::of),
            self.opened,
            self.published,
            self.created_at,
            self.updated_at,
            video_media,
            trailer,
            banner,
            thumbnail,
            thumbnail_half,
            self.categories.into_iter().map(CategoryId::from).collect(),
            self.genres.into_iter().map(GenreId::from).collect(),
            self.cast_members.into_iter().map(CastMemberId::from).collect(),
        ))
    }
}
