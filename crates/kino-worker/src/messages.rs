//! Wire format of the encoder's callback messages.
//!
//! The encoder reports in camelCase JSON discriminated by a `status` field.
//! Only `COMPLETED` and `ERROR` are emitted today; anything else fails to
//! parse and is dropped by the consumer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum EncoderCallback {
    #[serde(rename = "COMPLETED")]
    Completed {
        /// The video aggregate the encoded asset belongs to.
        id: String,
        #[serde(rename = "outputBucketPath")]
        output_bucket_path: String,
        video: EncodedVideoMetadata,
    },
    #[serde(rename = "ERROR")]
    Error {
        message: EncoderErrorMessage,
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedVideoMetadata {
    #[serde(rename = "resourceId")]
    pub resource_id: String,
    #[serde(rename = "encodedVideoFolder")]
    pub encoded_video_folder: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderErrorMessage {
    #[serde(rename = "resourceId")]
    pub resource_id: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
}
