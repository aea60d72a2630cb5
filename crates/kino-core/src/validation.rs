//! Accumulating validation handler.
//!
//! Validation never short-circuits: the aggregate's own field checks and the
//! three cross-aggregate existence checks all append to the same
//! [`Notification`], so one failed request reports every violation at once.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Append-only collection of validation error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    errors: Vec<String>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one violation.
    pub fn append<S: Into<String>>(&mut self, message: S) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.errors.join(", "))
    }
}
