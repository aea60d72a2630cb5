//! Encoder callback consumer.
//!
//! Receives raw callback payloads from a channel (fed by whatever broker
//! binding the deployment uses), parses them, and applies status updates
//! through the handler context. Malformed payloads and encoder-reported
//! failures are logged and dropped; the loop itself never stops on a bad
//! message.

use std::sync::Arc;

use kino_core::models::MediaStatus;
use kino_services::{MediaStatusOutcome, UpdateMediaStatusCommand};
use tokio::sync::mpsc;

use crate::context::EncoderCallbackContext;
use crate::messages::EncoderCallback;

pub struct EncoderCallbackConsumer {
    shutdown_tx: mpsc::Sender<()>,
}

impl EncoderCallbackConsumer {
    /// Spawn the consumer loop over a payload channel.
    pub fn new(context: Arc<dyn EncoderCallbackContext>, payload_rx: mpsc::Receiver<String>) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tokio::spawn(async move {
            Self::consume_loop(context, payload_rx, shutdown_rx).await;
        });

        Self { shutdown_tx }
    }

    async fn consume_loop(
        context: Arc<dyn EncoderCallbackContext>,
        mut payload_rx: mpsc::Receiver<String>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!("Encoder callback consumer started");
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("Encoder callback consumer shutting down");
                    break;
                }
                payload = payload_rx.recv() => {
                    match payload {
                        Some(payload) => {
                            handle_payload(context.as_ref(), &payload).await;
                        }
                        None => {
                            tracing::info!("Payload channel closed, stopping consumer");
                            break;
                        }
                    }
                }
            }
        }
        tracing::info!("Encoder callback consumer stopped");
    }

    /// Signal the loop to stop; returns immediately without waiting for an
    /// in-flight payload to finish.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Parse and apply one callback payload. Returns the applied outcome, or
/// `None` when the payload was dropped (malformed, or an encoder-side error
/// report that carries no status transition to apply).
pub async fn handle_payload(
    context: &dyn EncoderCallbackContext,
    payload: &str,
) -> Option<MediaStatusOutcome> {
    let callback: EncoderCallback = match serde_json::from_str(payload) {
        Ok(callback) => callback,
        Err(err) => {
            tracing::warn!(error = %err, "Dropping malformed encoder callback");
            return None;
        }
    };

    match callback {
        EncoderCallback::Completed { id, video, .. } => {
            let cmd = UpdateMediaStatusCommand {
                video_id: id,
                media_id: video.resource_id,
                status: MediaStatus::Completed,
                folder: Some(video.encoded_video_folder),
                filename: Some(video.file_path),
            };
            match context.update_media_status(cmd).await {
                Ok(outcome) => {
                    tracing::info!(outcome = ?outcome, "Applied encoder completion");
                    Some(outcome)
                }
                Err(err) => {
                    tracing::error!(error = %err, "Failed to apply encoder completion");
                    None
                }
            }
        }
        EncoderCallback::Error { message, error } => {
            tracing::warn!(
                resource_id = %message.resource_id,
                file_path = %message.file_path,
                error = %error,
                "Encoder reported a failure"
            );
            None
        }
    }
}
