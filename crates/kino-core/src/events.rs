//! Domain events published toward external consumers.

use serde::{Deserialize, Serialize};

use crate::ids::MediaId;

/// Events emitted by the video use cases.
///
/// `MediaCreated` is published when a main-feature media asset is attached to
/// a video; the external encoder consumes it and later reports back through
/// the inbound callback channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VideoEvent {
    MediaCreated {
        resource_id: MediaId,
        file_path: String,
    },
}
