//! Asynchronous encoder callback handling.
//!
//! The external encoder reports progress out-of-band; this crate parses its
//! callback messages and drives the media status state machine through
//! `kino-services`.

pub mod consumer;
pub mod context;
pub mod messages;

pub use consumer::{handle_payload, EncoderCallbackConsumer};
pub use context::EncoderCallbackContext;
pub use messages::{EncodedVideoMetadata, EncoderCallback, EncoderErrorMessage};
