//! Opaque identifiers for the catalog aggregates.
//!
//! Identifiers are string-backed: foreign IDs arrive as raw strings from the
//! outside and must flow through existence validation verbatim, so an unknown
//! or malformed ID is reported as "could not be found" rather than failing to
//! parse. Fresh IDs are hyphenated UUID v4 strings.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh unique identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from<S: Into<String>>(value: S) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identity of a [`crate::models::Video`] aggregate.
    VideoId
);
string_id!(
    /// Weak reference to a category aggregate.
    CategoryId
);
string_id!(
    /// Weak reference to a genre aggregate.
    GenreId
);
string_id!(
    /// Weak reference to a cast member aggregate.
    CastMemberId
);
string_id!(
    /// Identity of a stored audio/video media value object, used to correlate
    /// encoder callbacks with the slot that still holds the media.
    MediaId
);
