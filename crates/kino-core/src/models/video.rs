//! The Video aggregate root.
//!
//! The aggregate exclusively owns its media value objects: the slot setters
//! are the only way media state enters it, and every mutating operation bumps
//! `updated_at`. Construction never fails — `validate` is a separate,
//! explicit step appending to a [`Notification`] so callers can accumulate
//! field violations together with cross-aggregate existence errors before
//! failing a request.
//!
//! Category, genre and cast-member identifiers are weak references: only the
//! ID is stored, and existence is re-verified on every create/update.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CastMemberId, CategoryId, GenreId, VideoId};
use crate::models::media::{AudioVideoMedia, ImageMedia};
use crate::models::rating::Rating;
use crate::validation::Notification;

pub const TITLE_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 4000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    id: VideoId,
    title: Option<String>,
    description: Option<String>,
    launch_year: Option<i32>,
    duration: f64,
    rating: Option<Rating>,
    opened: bool,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    video: Option<AudioVideoMedia>,
    trailer: Option<AudioVideoMedia>,
    banner: Option<ImageMedia>,
    thumbnail: Option<ImageMedia>,
    thumbnail_half: Option<ImageMedia>,
    categories: HashSet<CategoryId>,
    genres: HashSet<GenreId>,
    cast_members: HashSet<CastMemberId>,
}

impl Video {
    /// Construct a new aggregate with a fresh id and a single timestamp
    /// snapshot for both `created_at` and `updated_at`. Does not validate.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        launch_year: Option<i32>,
        duration: f64,
        rating: Option<Rating>,
        opened: bool,
        published: bool,
        categories: HashSet<CategoryId>,
        genres: HashSet<GenreId>,
        cast_members: HashSet<CastMemberId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: VideoId::new(),
            title,
            description,
            launch_year,
            duration,
            rating,
            opened,
            published,
            created_at: now,
            updated_at: now,
            video: None,
            trailer: None,
            banner: None,
            thumbnail: None,
            thumbnail_half: None,
            categories,
            genres,
            cast_members,
        }
    }

    /// Reconstruct a persisted aggregate, all fields included. Used by
    /// repository implementations; performs no validation and no timestamp
    /// bumping.
    #[allow(clippy::too_many_arguments)]
    pub fn with(
        id: VideoId,
        title: Option<String>,
        description: Option<String>,
        launch_year: Option<i32>,
        duration: f64,
        rating: Option<Rating>,
        opened: bool,
        published: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        video: Option<AudioVideoMedia>,
        trailer: Option<AudioVideoMedia>,
        banner: Option<ImageMedia>,
        thumbnail: Option<ImageMedia>,
        thumbnail_half: Option<ImageMedia>,
        categories: HashSet<CategoryId>,
        genres: HashSet<GenreId>,
        cast_members: HashSet<CastMemberId>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            launch_year,
            duration,
            rating,
            opened,
            published,
            created_at,
            updated_at,
            video,
            trailer,
            banner,
            thumbnail,
            thumbnail_half,
            categories,
            genres,
            cast_members,
        }
    }

    /// Replace all descriptive fields and association sets; bumps
    /// `updated_at` and leaves the media slots untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        launch_year: Option<i32>,
        duration: f64,
        rating: Option<Rating>,
        opened: bool,
        published: bool,
        categories: HashSet<CategoryId>,
        genres: HashSet<GenreId>,
        cast_members: HashSet<CastMemberId>,
    ) {
        self.title = title;
        self.description = description;
        self.launch_year = launch_year;
        self.duration = duration;
        self.rating = rating;
        self.opened = opened;
        self.published = published;
        self.categories = categories;
        self.genres = genres;
        self.cast_members = cast_members;
        self.touch();
    }

    /// Append every violation to the handler; never raises individually.
    pub fn validate(&self, notification: &mut Notification) {
        Self::validate_text(
            "title",
            self.title.as_deref(),
            TITLE_MAX_LENGTH,
            notification,
        );
        Self::validate_text(
            "description",
            self.description.as_deref(),
            DESCRIPTION_MAX_LENGTH,
            notification,
        );
        if self.launch_year.is_none() {
            notification.append("'launch_year' should not be null");
        }
        if self.rating.is_none() {
            notification.append("'rating' should not be null");
        }
        if self.duration < 0.0 {
            notification.append("'duration' should not be a negative value");
        }
    }

    fn validate_text(field: &str, value: Option<&str>, max: usize, notification: &mut Notification) {
        match value {
            None => notification.append(format!("'{}' should not be null", field)),
            Some(text) if text.trim().is_empty() => {
                notification.append(format!("'{}' should not be empty", field));
            }
            Some(text) if text.chars().count() > max => {
                notification.append(format!(
                    "'{}' must be between 1 and {} characters",
                    field, max
                ));
            }
            Some(_) => {}
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> &VideoId {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn launch_year(&self) -> Option<i32> {
        self.launch_year
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn opened(&self) -> bool {
        self.opened
    }

    pub fn published(&self) -> bool {
        self.published
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn video(&self) -> Option<&AudioVideoMedia> {
        self.video.as_ref()
    }

    pub fn trailer(&self) -> Option<&AudioVideoMedia> {
        self.trailer.as_ref()
    }

    pub fn banner(&self) -> Option<&ImageMedia> {
        self.banner.as_ref()
    }

    pub fn thumbnail(&self) -> Option<&ImageMedia> {
        self.thumbnail.as_ref()
    }

    pub fn thumbnail_half(&self) -> Option<&ImageMedia> {
        self.thumbnail_half.as_ref()
    }

    pub fn categories(&self) -> &HashSet<CategoryId> {
        &self.categories
    }

    pub fn genres(&self) -> &HashSet<GenreId> {
        &self.genres
    }

    pub fn cast_members(&self) -> &HashSet<CastMemberId> {
        &self.cast_members
    }

    pub fn set_video(&mut self, media: AudioVideoMedia) {
        self.video = Some(media);
        self.touch();
    }

    pub fn set_trailer(&mut self, media: AudioVideoMedia) {
        self.trailer = Some(media);
        self.touch();
    }

    pub fn set_banner(&mut self, media: ImageMedia) {
        self.banner = Some(media);
        self.touch();
    }

    pub fn set_thumbnail(&mut self, media: ImageMedia) {
        self.thumbnail = Some(media);
        self.touch();
    }

    pub fn set_thumbnail_half(&mut self, media: ImageMedia) {
        self.thumbnail_half = Some(media);
        self.touch();
    }
}
