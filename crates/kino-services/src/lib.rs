//! Orchestrating use cases for the video catalog.
//!
//! The services in this crate coordinate validation, aggregate mutation,
//! resource upload, persistence, and compensating cleanup. They depend only
//! on the collaborator traits from `kino-core` plus the media resource
//! gateway from `kino-storage`, so every flow is testable with in-memory
//! doubles.

pub mod testing;
pub mod video;

pub use video::media_status::{
    MediaStatusOutcome, MediaStatusService, OverwritePolicy, UpdateMediaStatusCommand,
};
pub use video::write::{CreateVideoCommand, UpdateVideoCommand, VideoWriteService};
