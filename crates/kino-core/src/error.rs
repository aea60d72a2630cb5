//! Error types module
//!
//! All errors raised by the catalog core are unified under the `AppError`
//! enum. Validation failures carry the full accumulated [`Notification`] so a
//! single request reports every violation at once instead of the first one.

use std::io;

use crate::validation::Notification;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(Notification),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a validation error from an accumulated notification.
    pub fn validation(notification: Notification) -> Self {
        AppError::Validation(notification)
    }

    /// The validation messages carried by this error, if any.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            AppError::Validation(notification) => Some(notification.errors()),
            _ => None,
        }
    }
}

impl From<Notification> for AppError {
    fn from(notification: Notification) -> Self {
        AppError::Validation(notification)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}
