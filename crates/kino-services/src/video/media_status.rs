//! Encoder callback handling: applies asynchronous media status updates to
//! the aggregate's audio/video slots.
//!
//! Callbacks race against catalog mutations, so every lookup can legitimately
//! miss: the video may have been deleted, or the media slot replaced since
//! the encoder picked the asset up. Those cases are reported as distinct
//! outcomes rather than errors — a stale callback is normal operation, not a
//! fault.

use std::sync::Arc;

use kino_core::ids::VideoId;
use kino_core::models::{AudioVideoMedia, MediaStatus, VideoMediaType};
use kino_core::{AppError, VideoRepository};

/// What to do when a callback arrives for media that already reached
/// `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Apply the incoming status unconditionally. A repeated `Completed`
    /// callback overwrites the encoded location; a late `Processing` callback
    /// moves the media backwards.
    #[default]
    AllowReapply,
    /// Ignore `Processing` and `Completed` callbacks once the media is
    /// `Completed`. `Error` still applies.
    Monotonic,
}

/// Inbound status report from the encoder.
#[derive(Debug, Clone)]
pub struct UpdateMediaStatusCommand {
    pub video_id: String,
    pub media_id: String,
    pub status: MediaStatus,
    pub folder: Option<String>,
    pub filename: Option<String>,
}

/// Result of applying a callback. Only `Updated` implies a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatusOutcome {
    Updated,
    /// No video with the reported ID exists anymore.
    VideoNotFound,
    /// The video exists but neither audio/video slot carries the reported
    /// media ID; the slot was replaced after the encoder started.
    MediaIdMismatch,
    /// Dropped by the [`OverwritePolicy::Monotonic`] policy.
    AlreadyCompleted,
}

pub struct MediaStatusService {
    repository: Arc<dyn VideoRepository>,
    policy: OverwritePolicy,
}

impl MediaStatusService {
    pub fn new(repository: Arc<dyn VideoRepository>, policy: OverwritePolicy) -> Self {
        Self { repository, policy }
    }

    #[tracing::instrument(
        skip(self, cmd),
        fields(video_id = %cmd.video_id, media_id = %cmd.media_id, status = %cmd.status)
    )]
    pub async fn update_media_status(
        &self,
        cmd: UpdateMediaStatusCommand,
    ) -> Result<MediaStatusOutcome, AppError> {
        // There is no transition back to Pending, and the inbound channel
        // never carries it; such a command has nothing to apply.
        if cmd.status == MediaStatus::Pending {
            return Err(AppError::Internal(
                "Status callbacks cannot move media back to pending".to_string(),
            ));
        }

        let video_id = VideoId::from(cmd.video_id.as_str());
        let Some(mut video) = self.repository.find_by_id(&video_id).await? else {
            tracing::info!("Dropping status callback for unknown video");
            return Ok(MediaStatusOutcome::VideoNotFound);
        };

        let slot = [
            (VideoMediaType::Video, video.video()),
            (VideoMediaType::Trailer, video.trailer()),
        ]
        .into_iter()
        .find_map(|(slot, media)| {
            media
                .filter(|m| m.id().as_str() == cmd.media_id)
                .map(|m| (slot, m.clone()))
        });

        let Some((slot, media)) = slot else {
            tracing::info!("Dropping status callback for unmatched media id");
            return Ok(MediaStatusOutcome::MediaIdMismatch);
        };

        if self.policy == OverwritePolicy::Monotonic
            && media.status() == MediaStatus::Completed
            && matches!(cmd.status, MediaStatus::Processing | MediaStatus::Completed)
        {
            return Ok(MediaStatusOutcome::AlreadyCompleted);
        }

        let updated = match cmd.status {
            MediaStatus::Processing => media.processing(),
            MediaStatus::Completed => media.completed(encoded_path(
                cmd.folder.as_deref(),
                cmd.filename.as_deref(),
            )),
            MediaStatus::Error => media.errored(),
            MediaStatus::Pending => unreachable!("rejected before the lookup"),
        };
        set_slot(&mut video, slot, updated);

        self.repository.update(&video).await?;
        Ok(MediaStatusOutcome::Updated)
    }
}

/// Join the encoder-reported folder and filename, omitting the separator
/// when either part is absent.
fn encoded_path(folder: Option<&str>, filename: Option<&str>) -> String {
    match (folder, filename) {
        (Some(folder), Some(filename)) => format!("{}/{}", folder, filename),
        (Some(folder), None) => folder.to_string(),
        (None, Some(filename)) => filename.to_string(),
        (None, None) => String::new(),
    }
}

fn set_slot(video: &mut kino_core::models::Video, slot: VideoMediaType, media: AudioVideoMedia) {
    match slot {
        VideoMediaType::Video => video.set_video(media),
        VideoMediaType::Trailer => video.set_trailer(media),
        // Only audio/video slots carry a status; image slots never match.
        _ => unreachable!("status updates only apply to audio/video slots"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockVideoRepository;
    use kino_core::models::{Rating, Video};
    use std::collections::HashSet;

    fn video_with_feature() -> Video {
        let mut video = Video::new(
            Some("System Design Interviews".to_string()),
            Some("A deep dive into distributed systems".to_string()),
            Some(2022),
            120.5,
            Some(Rating::L),
            false,
            true,
            HashSet::new(),
            HashSet::new(),
            HashSet::new(),
        );
        video.set_video(AudioVideoMedia::pending(
            "abc",
            "movie.mp4",
            format!("{}/video", video.id()),
        ));
        video
    }

    fn command(video: &Video, status: MediaStatus) -> UpdateMediaStatusCommand {
        UpdateMediaStatusCommand {
            video_id: video.id().as_str().to_string(),
            media_id: video.video().unwrap().id().as_str().to_string(),
            status,
            folder: None,
            filename: None,
        }
    }

    fn service(repository: &MockVideoRepository) -> MediaStatusService {
        MediaStatusService::new(Arc::new(repository.clone()), OverwritePolicy::default())
    }

    #[tokio::test]
    async fn completed_callback_records_the_encoded_location() {
        let repository = MockVideoRepository::new();
        let video = video_with_feature();
        repository.insert(video.clone());

        let outcome = service(&repository)
            .update_media_status(UpdateMediaStatusCommand {
                folder: Some("encoded_media".to_string()),
                filename: Some("filename.mp4".to_string()),
                ..command(&video, MediaStatus::Completed)
            })
            .await
            .unwrap();

        assert_eq!(outcome, MediaStatusOutcome::Updated);
        let media = repository.get(video.id()).unwrap().video().unwrap().clone();
        assert_eq!(media.status(), MediaStatus::Completed);
        assert_eq!(media.encoded_location(), "encoded_media/filename.mp4");
        assert_eq!(media.id(), video.video().unwrap().id());
    }

    #[tokio::test]
    async fn processing_callback_leaves_the_encoded_location_blank() {
        let repository = MockVideoRepository::new();
        let video = video_with_feature();
        repository.insert(video.clone());

        let outcome = service(&repository)
            .update_media_status(command(&video, MediaStatus::Processing))
            .await
            .unwrap();

        assert_eq!(outcome, MediaStatusOutcome::Updated);
        let media = repository.get(video.id()).unwrap().video().unwrap().clone();
        assert_eq!(media.status(), MediaStatus::Processing);
        assert_eq!(media.encoded_location(), "");
    }

    #[tokio::test]
    async fn error_callback_marks_the_media_errored() {
        let repository = MockVideoRepository::new();
        let video = video_with_feature();
        repository.insert(video.clone());

        let outcome = service(&repository)
            .update_media_status(command(&video, MediaStatus::Error))
            .await
            .unwrap();

        assert_eq!(outcome, MediaStatusOutcome::Updated);
        let media = repository.get(video.id()).unwrap().video().unwrap().clone();
        assert_eq!(media.status(), MediaStatus::Error);
    }

    #[tokio::test]
    async fn callback_for_the_trailer_slot_updates_the_trailer() {
        let repository = MockVideoRepository::new();
        let mut video = video_with_feature();
        video.set_trailer(AudioVideoMedia::pending(
            "def",
            "trailer.mp4",
            format!("{}/trailer", video.id()),
        ));
        repository.insert(video.clone());

        let outcome = service(&repository)
            .update_media_status(UpdateMediaStatusCommand {
                media_id: video.trailer().unwrap().id().as_str().to_string(),
                ..command(&video, MediaStatus::Processing)
            })
            .await
            .unwrap();

        assert_eq!(outcome, MediaStatusOutcome::Updated);
        let stored = repository.get(video.id()).unwrap();
        assert_eq!(stored.trailer().unwrap().status(), MediaStatus::Processing);
        assert_eq!(stored.video().unwrap().status(), MediaStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_video_is_reported_without_an_error() {
        let repository = MockVideoRepository::new();

        let outcome = service(&repository)
            .update_media_status(UpdateMediaStatusCommand {
                video_id: "v-gone".to_string(),
                media_id: "m-1".to_string(),
                status: MediaStatus::Completed,
                folder: None,
                filename: None,
            })
            .await
            .unwrap();

        assert_eq!(outcome, MediaStatusOutcome::VideoNotFound);
        assert_eq!(repository.update_calls(), 0);
    }

    #[tokio::test]
    async fn mismatched_media_id_is_dropped_without_a_write() {
        let repository = MockVideoRepository::new();
        let video = video_with_feature();
        repository.insert(video.clone());

        let outcome = service(&repository)
            .update_media_status(UpdateMediaStatusCommand {
                media_id: "m-replaced".to_string(),
                ..command(&video, MediaStatus::Completed)
            })
            .await
            .unwrap();

        assert_eq!(outcome, MediaStatusOutcome::MediaIdMismatch);
        assert_eq!(repository.update_calls(), 0);
        let stored = repository.get(video.id()).unwrap();
        assert_eq!(stored.video().unwrap().status(), MediaStatus::Pending);
    }

    #[tokio::test]
    async fn pending_callback_is_rejected_without_a_write() {
        let repository = MockVideoRepository::new();
        let video = video_with_feature();
        repository.insert(video.clone());

        let err = service(&repository)
            .update_media_status(command(&video, MediaStatus::Pending))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("pending"));
        assert_eq!(repository.update_calls(), 0);
    }

    #[test]
    fn encoded_path_omits_the_separator_for_missing_parts() {
        assert_eq!(
            encoded_path(Some("encoded_media"), Some("filename.mp4")),
            "encoded_media/filename.mp4"
        );
        assert_eq!(encoded_path(Some("encoded_media"), None), "encoded_media");
        assert_eq!(encoded_path(None, Some("filename.mp4")), "filename.mp4");
        assert_eq!(encoded_path(None, None), "");
    }

    #[tokio::test]
    async fn default_policy_reapplies_over_a_completed_media() {
        let repository = MockVideoRepository::new();
        let video = video_with_feature();
        repository.insert(video.clone());
        let service = service(&repository);

        service
            .update_media_status(UpdateMediaStatusCommand {
                folder: Some("encoded_media".to_string()),
                filename: Some("first.mp4".to_string()),
                ..command(&video, MediaStatus::Completed)
            })
            .await
            .unwrap();
        let outcome = service
            .update_media_status(UpdateMediaStatusCommand {
                folder: Some("encoded_media".to_string()),
                filename: Some("second.mp4".to_string()),
                ..command(&video, MediaStatus::Completed)
            })
            .await
            .unwrap();

        assert_eq!(outcome, MediaStatusOutcome::Updated);
        let media = repository.get(video.id()).unwrap().video().unwrap().clone();
        assert_eq!(media.encoded_location(), "encoded_media/second.mp4");
    }

    #[tokio::test]
    async fn monotonic_policy_drops_late_callbacks_after_completion() {
        let repository = MockVideoRepository::new();
        let video = video_with_feature();
        repository.insert(video.clone());
        let service =
            MediaStatusService::new(Arc::new(repository.clone()), OverwritePolicy::Monotonic);

        service
            .update_media_status(UpdateMediaStatusCommand {
                folder: Some("encoded_media".to_string()),
                filename: Some("filename.mp4".to_string()),
                ..command(&video, MediaStatus::Completed)
            })
            .await
            .unwrap();

        let late = service
            .update_media_status(command(&video, MediaStatus::Processing))
            .await
            .unwrap();
        assert_eq!(late, MediaStatusOutcome::AlreadyCompleted);
        let media = repository.get(video.id()).unwrap().video().unwrap().clone();
        assert_eq!(media.status(), MediaStatus::Completed);
        assert_eq!(media.encoded_location(), "encoded_media/filename.mp4");

        // Errors still apply after completion.
        let errored = service
            .update_media_status(command(&video, MediaStatus::Error))
            .await
            .unwrap();
        assert_eq!(errored, MediaStatusOutcome::Updated);
        assert_eq!(
            repository.get(video.id()).unwrap().video().unwrap().status(),
            MediaStatus::Error
        );
    }
}
