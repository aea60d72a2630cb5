//! Kino Core Library
//!
//! This crate provides the domain models, identifiers, validation handler,
//! error types, and collaborator traits shared across all Kino components.

pub mod error;
pub mod events;
pub mod gateways;
pub mod ids;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use error::AppError;
pub use events::VideoEvent;
pub use gateways::{EventPublisher, ExistenceGateway, VideoRepository};
pub use ids::{CastMemberId, CategoryId, GenreId, MediaId, VideoId};
pub use validation::Notification;
