use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Audience classification for a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    Er,
    L,
    Age10,
    Age12,
    Age14,
    Age16,
    Age18,
}

/// Label lookup table, built once and read-only afterwards.
static RATINGS_BY_LABEL: LazyLock<HashMap<&'static str, Rating>> = LazyLock::new(|| {
    Rating::ALL.iter().map(|r| (r.label(), *r)).collect()
});

impl Rating {
    pub const ALL: [Rating; 7] = [
        Rating::Er,
        Rating::L,
        Rating::Age10,
        Rating::Age12,
        Rating::Age14,
        Rating::Age16,
        Rating::Age18,
    ];

    /// External label used by clients and persisted rows.
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Er => "ER",
            Rating::L => "L",
            Rating::Age10 => "10",
            Rating::Age12 => "12",
            Rating::Age14 => "14",
            Rating::Age16 => "16",
            Rating::Age18 => "18",
        }
    }

    /// Resolve a label; unknown labels yield `None` and are treated by the
    /// orchestrators exactly like a missing rating.
    pub fn of(label: &str) -> Option<Rating> {
        RATINGS_BY_LABEL.get(label).copied()
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_resolves_to_its_rating() {
        for rating in Rating::ALL {
            assert_eq!(Rating::of(rating.label()), Some(rating));
        }
    }

    #[test]
    fn unknown_labels_resolve_to_none() {
        assert_eq!(Rating::of("PG-13"), None);
        assert_eq!(Rating::of(""), None);
        assert_eq!(Rating::of("l"), None);
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(Rating::Age12.to_string(), "12");
        assert_eq!(Rating::Er.to_string(), "ER");
    }
}
