//! Callback handler context trait.
//!
//! The consumer loop only needs one operation: apply a media status update.
//! The trait keeps the loop testable with a stub context and is implemented
//! directly by [`MediaStatusService`].

use async_trait::async_trait;

use kino_core::AppError;
use kino_services::{MediaStatusOutcome, MediaStatusService, UpdateMediaStatusCommand};

#[async_trait]
pub trait EncoderCallbackContext: Send + Sync {
    async fn update_media_status(
        &self,
        cmd: UpdateMediaStatusCommand,
    ) -> Result<MediaStatusOutcome, AppError>;
}

#[async_trait]
impl EncoderCallbackContext for MediaStatusService {
    async fn update_media_status(
        &self,
        cmd: UpdateMediaStatusCommand,
    ) -> Result<MediaStatusOutcome, AppError> {
        MediaStatusService::update_media_status(self, cmd).await
    }
}
