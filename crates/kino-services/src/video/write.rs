//! Create/Update video orchestrators.
//!
//! Both flows share the same shape: parse and build/mutate the aggregate, run
//! the three existence validations plus the aggregate's own validation into
//! one accumulating notification, and only then touch storage and the
//! repository. Any failure after validation triggers the compensating
//! resource cleanup so a partially-applied multi-resource write is never
//! observable from the outside.

use std::sync::Arc;

use kino_core::ids::{CastMemberId, CategoryId, GenreId, VideoId};
use kino_core::models::{Rating, Video, VideoMediaType, VideoResource};
use kino_core::{AppError, EventPublisher, ExistenceGateway, Notification, VideoEvent, VideoRepository};
use kino_storage::MediaResourceGateway;

use crate::video::validation::validate_existing_ids;

/// Raw input for creating a video. Fields that the aggregate requires are
/// optional here: missing values surface through validation, never through
/// construction.
#[derive(Debug, Clone, Default)]
pub struct CreateVideoCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub launch_year: Option<i32>,
    pub duration: f64,
    pub rating: Option<String>,
    pub opened: bool,
    pub published: bool,
    pub categories: Vec<String>,
    pub genres: Vec<String>,
    pub cast_members: Vec<String>,
    pub video: Option<VideoResource>,
    pub trailer: Option<VideoResource>,
    pub banner: Option<VideoResource>,
    pub thumbnail: Option<VideoResource>,
    pub thumbnail_half: Option<VideoResource>,
}

/// Raw input for updating a video. Media slots without a supplied resource
/// are kept as-is.
#[derive(Debug, Clone, Default)]
pub struct UpdateVideoCommand {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub launch_year: Option<i32>,
    pub duration: f64,
    pub rating: Option<String>,
    pub opened: bool,
    pub published: bool,
    pub categories: Vec<String>,
    pub genres: Vec<String>,
    pub cast_members: Vec<String>,
    pub video: Option<VideoResource>,
    pub trailer: Option<VideoResource>,
    pub banner: Option<VideoResource>,
    pub thumbnail: Option<VideoResource>,
    pub thumbnail_half: Option<VideoResource>,
}

#[derive(Default)]
struct MediaPayloads {
    video: Option<VideoResource>,
    trailer: Option<VideoResource>,
    banner: Option<VideoResource>,
    thumbnail: Option<VideoResource>,
    thumbnail_half: Option<VideoResource>,
}

enum Persist {
    Create,
    Update,
}

pub struct VideoWriteService {
    repository: Arc<dyn VideoRepository>,
    media: MediaResourceGateway,
    categories: Arc<dyn ExistenceGateway<CategoryId>>,
    genres: Arc<dyn ExistenceGateway<GenreId>>,
    cast_members: Arc<dyn ExistenceGateway<CastMemberId>>,
    events: Arc<dyn EventPublisher>,
}

impl VideoWriteService {
    pub fn new(
        repository: Arc<dyn VideoRepository>,
        media: MediaResourceGateway,
        categories: Arc<dyn ExistenceGateway<CategoryId>>,
        genres: Arc<dyn ExistenceGateway<GenreId>>,
        cast_members: Arc<dyn ExistenceGateway<CastMemberId>>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            media,
            categories,
            genres,
            cast_members,
            events,
        }
    }

    #[tracing::instrument(skip(self, cmd))]
    pub async fn create(&self, cmd: CreateVideoCommand) -> Result<VideoId, AppError> {
        let rating = cmd.rating.as_deref().and_then(Rating::of);
        let category_ids: Vec<CategoryId> =
            cmd.categories.into_iter().map(CategoryId::from).collect();
        let genre_ids: Vec<GenreId> = cmd.genres.into_iter().map(GenreId::from).collect();
        let member_ids: Vec<CastMemberId> =
            cmd.cast_members.into_iter().map(CastMemberId::from).collect();

        let mut video = Video::new(
            cmd.title,
            cmd.description,
            cmd.launch_year,
            cmd.duration,
            rating,
            cmd.opened,
            cmd.published,
            category_ids.iter().cloned().collect(),
            genre_ids.iter().cloned().collect(),
            member_ids.iter().cloned().collect(),
        );

        let mut notification = Notification::new();
        self.validate_all(&category_ids, &genre_ids, &member_ids, &video, &mut notification)
            .await?;
        if notification.has_errors() {
            return Err(AppError::Validation(notification));
        }

        let payloads = MediaPayloads {
            video: cmd.video,
            trailer: cmd.trailer,
            banner: cmd.banner,
            thumbnail: cmd.thumbnail,
            thumbnail_half: cmd.thumbnail_half,
        };
        let has_feature = payloads.video.is_some();
        let id = video.id().clone();

        let mut written = Vec::new();
        if let Err(err) = self
            .store_media_and_persist(&mut video, payloads, Persist::Create, &mut written)
            .await
        {
            tracing::error!(video_id = %id, error = %err, "Create video failed after validation");
            // Nothing for this video pre-exists, so the whole prefix is ours.
            self.clear_all(&id).await;
            return Err(AppError::Internal(format!(
                "An error on create video was observed [videoId:{}]",
                id
            )));
        }

        if has_feature {
            self.publish_media_created(&video).await;
        }

        tracing::info!(video_id = %id, "Video created");
        Ok(id)
    }

    #[tracing::instrument(skip(self, cmd), fields(video_id = %cmd.id))]
    pub async fn update(&self, cmd: UpdateVideoCommand) -> Result<VideoId, AppError> {
        let id = VideoId::from(cmd.id.as_str());
        let mut video = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video with ID {} was not found", id)))?;

        let rating = cmd.rating.as_deref().and_then(Rating::of);
        let category_ids: Vec<CategoryId> =
            cmd.categories.into_iter().map(CategoryId::from).collect();
        let genre_ids: Vec<GenreId> = cmd.genres.into_iter().map(GenreId::from).collect();
        let member_ids: Vec<CastMemberId> =
            cmd.cast_members.into_iter().map(CastMemberId::from).collect();

        video.update(
            cmd.title,
            cmd.description,
            cmd.launch_year,
            cmd.duration,
            rating,
            cmd.opened,
            cmd.published,
            category_ids.iter().cloned().collect(),
            genre_ids.iter().cloned().collect(),
            member_ids.iter().cloned().collect(),
        );

        let mut notification = Notification::new();
        self.validate_all(&category_ids, &genre_ids, &member_ids, &video, &mut notification)
            .await?;
        if notification.has_errors() {
            return Err(AppError::Validation(notification));
        }

        let payloads = MediaPayloads {
            video: cmd.video,
            trailer: cmd.trailer,
            banner: cmd.banner,
            thumbnail: cmd.thumbnail,
            thumbnail_half: cmd.thumbnail_half,
        };
        let has_feature = payloads.video.is_some();

        let mut written = Vec::new();
        if let Err(err) = self
            .store_media_and_persist(&mut video, payloads, Persist::Update, &mut written)
            .await
        {
            tracing::error!(video_id = %id, error = %err, "Update video failed after validation");
            self.remove_written(&id, &written).await;
            return Err(AppError::Internal(format!(
                "An error on update video was observed [videoId:{}]",
                id
            )));
        }

        if has_feature {
            self.publish_media_created(&video).await;
        }

        tracing::info!(video_id = %id, "Video updated");
        Ok(id)
    }

    /// The three existence validations run unconditionally — never
    /// short-circuited — and the aggregate validation appends to the same
    /// notification, so one request reports every category of violation.
    async fn validate_all(
        &self,
        categories: &[CategoryId],
        genres: &[GenreId],
        members: &[CastMemberId],
        video: &Video,
        notification: &mut Notification,
    ) -> Result<(), AppError> {
        validate_existing_ids("categories", categories, self.categories.as_ref(), notification)
            .await?;
        validate_existing_ids("genres", genres, self.genres.as_ref(), notification).await?;
        validate_existing_ids(
            "cast members",
            members,
            self.cast_members.as_ref(),
            notification,
        )
        .await?;
        video.validate(notification);
        Ok(())
    }

    /// Store each supplied resource and persist the aggregate, recording
    /// every storage key this operation writes so a failure can be undone
    /// without touching keys written by earlier operations.
    async fn store_media_and_persist(
        &self,
        video: &mut Video,
        payloads: MediaPayloads,
        mode: Persist,
        written: &mut Vec<String>,
    ) -> Result<(), AppError> {
        let id = video.id().clone();

        if let Some(resource) = payloads.video {
            let media = self
                .media
                .store_audio_video(&id, VideoMediaType::Video, &resource)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
            written.push(media.raw_location().to_string());
            video.set_video(media);
        }
        if let Some(resource) = payloads.trailer {
            let media = self
                .media
                .store_audio_video(&id, VideoMediaType::Trailer, &resource)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
            written.push(media.raw_location().to_string());
            video.set_trailer(media);
        }
        if let Some(resource) = payloads.banner {
            let media = self
                .media
                .store_image(&id, VideoMediaType::Banner, &resource)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
            written.push(media.location().to_string());
            video.set_banner(media);
        }
        if let Some(resource) = payloads.thumbnail {
            let media = self
                .media
                .store_image(&id, VideoMediaType::Thumbnail, &resource)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
            written.push(media.location().to_string());
            video.set_thumbnail(media);
        }
        if let Some(resource) = payloads.thumbnail_half {
            let media = self
                .media
                .store_image(&id, VideoMediaType::ThumbnailHalf, &resource)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
            written.push(media.location().to_string());
            video.set_thumbnail_half(media);
        }

        match mode {
            Persist::Create => self.repository.create(video).await?,
            Persist::Update => self.repository.update(video).await?,
        };
        Ok(())
    }

    /// Compensating cleanup for create: delete every resource stored for the
    /// video so a failed create leaves no externally-visible storage state.
    async fn clear_all(&self, id: &VideoId) {
        if let Err(err) = self.media.clear_resources(id).await {
            tracing::warn!(
                video_id = %id,
                error = %err,
                "Failed to clear stored resources after failure"
            );
        }
    }

    /// Compensating cleanup for update: delete exactly the keys this
    /// operation wrote. Blobs stored by earlier operations stay in place —
    /// the persisted aggregate still references them.
    async fn remove_written(&self, id: &VideoId, written: &[String]) {
        if let Err(err) = self.media.remove_resources(written).await {
            tracing::warn!(
                video_id = %id,
                error = %err,
                "Failed to remove stored resources after failure"
            );
        }
    }

    /// Notify the external encoder that a main-feature asset is available.
    /// Publication failure is logged, not fatal for the request.
    async fn publish_media_created(&self, video: &Video) {
        let Some(media) = video.video() else {
            return;
        };
        let event = VideoEvent::MediaCreated {
            resource_id: media.id().clone(),
            file_path: media.raw_location().to_string(),
        };
        if let Err(err) = self.events.publish(event).await {
            tracing::warn!(
                video_id = %video.id(),
                error = %err,
                "Failed to publish media created event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockEventPublisher, MockExistenceGateway, MockVideoRepository};
    use kino_core::models::MediaStatus;
    use kino_storage::InMemoryStorage;

    struct Harness {
        service: VideoWriteService,
        repository: MockVideoRepository,
        storage: InMemoryStorage,
        events: MockEventPublisher,
    }

    fn harness() -> Harness {
        let repository = MockVideoRepository::new();
        let storage = InMemoryStorage::new();
        let events = MockEventPublisher::new();
        let categories = MockExistenceGateway::with_existing(vec![CategoryId::from("c1")]);
        let genres = MockExistenceGateway::with_existing(vec![GenreId::from("g1")]);
        let members = MockExistenceGateway::with_existing(vec![CastMemberId::from("m1")]);

        let service = VideoWriteService::new(
            Arc::new(repository.clone()),
            MediaResourceGateway::new(Arc::new(storage.clone())),
            Arc::new(categories),
            Arc::new(genres),
            Arc::new(members),
            Arc::new(events.clone()),
        );

        Harness {
            service,
            repository,
            storage,
            events,
        }
    }

    fn resource(name: &str) -> VideoResource {
        VideoResource::new(name.as_bytes().to_vec(), "video/mp4", name.to_string())
    }

    fn valid_command() -> CreateVideoCommand {
        CreateVideoCommand {
            title: Some("System Design Interviews".to_string()),
            description: Some("A deep dive into distributed systems".to_string()),
            launch_year: Some(2022),
            duration: 120.5,
            rating: Some("L".to_string()),
            opened: false,
            published: true,
            categories: vec!["c1".to_string()],
            genres: vec!["g1".to_string()],
            cast_members: vec!["m1".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_with_all_five_resources_persists_and_stores_everything() {
        let h = harness();
        let cmd = CreateVideoCommand {
            video: Some(resource("movie.mp4")),
            trailer: Some(resource("trailer.mp4")),
            banner: Some(resource("banner.png")),
            thumbnail: Some(resource("thumb.png")),
            thumbnail_half: Some(resource("thumb_half.png")),
            ..valid_command()
        };

        let id = h.service.create(cmd).await.unwrap();

        let stored = h.repository.get(&id).unwrap();
        assert_eq!(stored.title(), Some("System Design Interviews"));
        assert_eq!(stored.video().unwrap().status(), MediaStatus::Pending);
        assert!(stored.trailer().is_some());
        assert!(stored.banner().is_some());
        assert!(stored.thumbnail().is_some());
        assert!(stored.thumbnail_half().is_some());
        assert_eq!(stored.categories().len(), 1);

        let mut expected_keys: Vec<String> = VideoMediaType::ALL
            .iter()
            .map(|t| format!("{}/{}", id, t))
            .collect();
        expected_keys.sort();
        assert_eq!(h.storage.stored_keys(), expected_keys);
    }

    #[tokio::test]
    async fn create_without_resources_leaves_slots_empty_and_publishes_nothing() {
        let h = harness();
        let id = h.service.create(valid_command()).await.unwrap();

        let stored = h.repository.get(&id).unwrap();
        assert!(stored.video().is_none());
        assert!(h.storage.is_empty());
        assert!(h.events.published().is_empty());
    }

    #[tokio::test]
    async fn create_publishes_media_created_for_the_main_feature() {
        let h = harness();
        let cmd = CreateVideoCommand {
            video: Some(resource("movie.mp4")),
            ..valid_command()
        };

        let id = h.service.create(cmd).await.unwrap();

        let media = h.repository.get(&id).unwrap().video().unwrap().clone();
        assert_eq!(
            h.events.published(),
            [VideoEvent::MediaCreated {
                resource_id: media.id().clone(),
                file_path: format!("{}/video", id),
            }]
        );
    }

    #[tokio::test]
    async fn create_with_missing_title_reports_one_error_and_touches_nothing() {
        let h = harness();
        let cmd = CreateVideoCommand {
            title: None,
            ..valid_command()
        };

        let err = h.service.create(cmd).await.unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap(),
            ["'title' should not be null"]
        );
        assert_eq!(h.repository.create_calls(), 0);
        assert!(h.storage.is_empty());
    }

    #[tokio::test]
    async fn create_with_unknown_rating_label_reports_missing_rating() {
        let h = harness();
        let cmd = CreateVideoCommand {
            rating: Some("PG-13".to_string()),
            ..valid_command()
        };

        let err = h.service.create(cmd).await.unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap(),
            ["'rating' should not be null"]
        );
    }

    #[tokio::test]
    async fn create_with_missing_categories_reports_them_and_touches_nothing() {
        let h = harness();
        let cmd = CreateVideoCommand {
            categories: vec!["c1".to_string(), "c-missing".to_string()],
            video: Some(resource("movie.mp4")),
            ..valid_command()
        };

        let err = h.service.create(cmd).await.unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap(),
            ["Some categories could not be found: c-missing"]
        );
        assert_eq!(h.repository.create_calls(), 0);
        assert!(h.storage.is_empty());
    }

    #[tokio::test]
    async fn create_concatenates_existence_and_field_errors() {
        let h = harness();
        let cmd = CreateVideoCommand {
            title: None,
            categories: vec!["c-missing".to_string()],
            genres: vec!["g-missing".to_string()],
            cast_members: vec!["m-missing".to_string()],
            ..valid_command()
        };

        let err = h.service.create(cmd).await.unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap(),
            [
                "Some categories could not be found: c-missing",
                "Some genres could not be found: g-missing",
                "Some cast members could not be found: m-missing",
                "'title' should not be null",
            ]
        );
    }

    #[tokio::test]
    async fn create_clears_resources_when_persistence_fails() {
        let h = harness();
        h.repository.fail_on_create();
        let cmd = CreateVideoCommand {
            video: Some(resource("movie.mp4")),
            banner: Some(resource("banner.png")),
            ..valid_command()
        };

        let err = h.service.create(cmd).await.unwrap_err();

        assert_eq!(h.repository.create_calls(), 1);
        assert!(h.storage.is_empty());
        assert!(h.events.published().is_empty());
        let message = err.to_string();
        assert!(
            message.contains("An error on create video was observed [videoId:"),
            "unexpected message: {}",
            message
        );
    }

    #[tokio::test]
    async fn create_succeeds_even_when_event_publication_fails() {
        let h = harness();
        h.events.fail_on_publish();
        let cmd = CreateVideoCommand {
            video: Some(resource("movie.mp4")),
            ..valid_command()
        };

        let id = h.service.create(cmd).await.unwrap();
        assert!(h.repository.get(&id).is_some());
    }

    fn update_command(id: &VideoId) -> UpdateVideoCommand {
        UpdateVideoCommand {
            id: id.as_str().to_string(),
            title: Some("Updated title".to_string()),
            description: Some("Updated description".to_string()),
            launch_year: Some(2023),
            duration: 90.0,
            rating: Some("16".to_string()),
            opened: true,
            published: false,
            categories: vec!["c1".to_string()],
            genres: vec!["g1".to_string()],
            cast_members: vec!["m1".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_existing_media() {
        let h = harness();
        let cmd = CreateVideoCommand {
            video: Some(resource("movie.mp4")),
            ..valid_command()
        };
        let id = h.service.create(cmd).await.unwrap();
        let original_media = h.repository.get(&id).unwrap().video().unwrap().clone();

        h.service.update(update_command(&id)).await.unwrap();

        let updated = h.repository.get(&id).unwrap();
        assert_eq!(updated.title(), Some("Updated title"));
        assert_eq!(updated.rating(), Some(Rating::Age16));
        assert_eq!(updated.video().unwrap().id(), original_media.id());
    }

    #[tokio::test]
    async fn update_attaches_newly_supplied_resources() {
        let h = harness();
        let id = h.service.create(valid_command()).await.unwrap();

        let cmd = UpdateVideoCommand {
            trailer: Some(resource("trailer.mp4")),
            ..update_command(&id)
        };
        h.service.update(cmd).await.unwrap();

        let updated = h.repository.get(&id).unwrap();
        assert!(updated.video().is_none());
        assert_eq!(updated.trailer().unwrap().raw_location(), format!("{}/trailer", id));
        assert_eq!(h.storage.stored_keys(), [format!("{}/trailer", id)]);
        // No main-feature media attached, so no event.
        assert!(h.events.published().is_empty());
    }

    #[tokio::test]
    async fn update_of_unknown_video_is_a_not_found_failure() {
        let h = harness();
        let id = VideoId::from("v-missing");

        let err = h.service.update(update_command(&id)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not found: Video with ID v-missing was not found"
        );
    }

    #[tokio::test]
    async fn update_validation_failure_has_no_side_effects() {
        let h = harness();
        let id = h.service.create(valid_command()).await.unwrap();
        let update_count_before = h.repository.update_calls();

        let cmd = UpdateVideoCommand {
            title: None,
            banner: Some(resource("banner.png")),
            ..update_command(&id)
        };
        let err = h.service.update(cmd).await.unwrap_err();

        assert_eq!(
            err.validation_errors().unwrap(),
            ["'title' should not be null"]
        );
        assert_eq!(h.repository.update_calls(), update_count_before);
        assert!(h.storage.is_empty());
        // The persisted aggregate is untouched.
        assert_eq!(
            h.repository.get(&id).unwrap().title(),
            Some("System Design Interviews")
        );
    }

    #[tokio::test]
    async fn update_failure_removes_only_the_resources_it_stored() {
        let h = harness();
        let cmd = CreateVideoCommand {
            video: Some(resource("movie.mp4")),
            ..valid_command()
        };
        let id = h.service.create(cmd).await.unwrap();
        h.repository.fail_on_update();

        let cmd = UpdateVideoCommand {
            banner: Some(resource("banner.png")),
            ..update_command(&id)
        };
        let err = h.service.update(cmd).await.unwrap_err();

        // The banner written by the failed update is rolled back; the
        // main-feature blob from the create survives because the persisted
        // aggregate still references it.
        assert_eq!(h.storage.stored_keys(), [format!("{}/video", id)]);
        assert!(h.repository.get(&id).unwrap().video().is_some());
        assert_eq!(
            err.to_string(),
            format!(
                "Internal error: An error on update video was observed [videoId:{}]",
                id
            )
        );
    }

    #[tokio::test]
    async fn update_failure_with_no_new_resources_leaves_storage_untouched() {
        let h = harness();
        let cmd = CreateVideoCommand {
            video: Some(resource("movie.mp4")),
            trailer: Some(resource("trailer.mp4")),
            ..valid_command()
        };
        let id = h.service.create(cmd).await.unwrap();
        let keys_before = h.storage.stored_keys();
        h.repository.fail_on_update();

        h.service.update(update_command(&id)).await.unwrap_err();

        assert_eq!(h.storage.stored_keys(), keys_before);
    }
}
