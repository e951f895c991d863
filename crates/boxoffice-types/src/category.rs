//! Indexed categories and normalized category keys.
//!
//! A [`Category`] names one dimension the catalog is indexed along
//! (studios, genres, ratings). A [`CategoryKey`] identifies a single value
//! within that dimension after normalization: trimmed, lowercased, and with
//! every `/` replaced by `-` so the key fits in one URL path segment.

use core::fmt;
use core::str::FromStr;
use std::borrow::Borrow;

use serde::Serialize;

/// One of the dimensions along which movies are indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Indexed by the `studio` field.
    Studios,
    /// Indexed by the `genre` field.
    Genres,
    /// Indexed by the `rating` field.
    Ratings,
}

impl Category {
    /// Every category, in index build order.
    pub const ALL: [Self; 3] = [Self::Studios, Self::Genres, Self::Ratings];

    /// The movie record field this category is built from.
    pub const fn field(self) -> &'static str {
        match self {
            Self::Studios => "studio",
            Self::Genres => "genre",
            Self::Ratings => "rating",
        }
    }

    /// The URL path segment naming this category's index.
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Studios => "studios",
            Self::Genres => "genres",
            Self::Ratings => "ratings",
        }
    }

    /// Resolve a path segment (`studios`, `genres`, `ratings`) to a category.
    ///
    /// Matching is exact; `Genres` or `genre` are not accepted.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.segment() == segment)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Returned when a string does not name a known [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_segment(s).ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// A normalized category value, safe to embed as a single path segment.
///
/// Keys are only constructed through [`CategoryKey::normalize`], so every
/// key in the system is already trimmed, lowercase, and slash-free.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Normalize a raw category value into a key.
    ///
    /// Returns `None` when the value is empty after trimming; such values
    /// never produce an index entry.
    pub fn normalize(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase().replace('/', "-");
        if key.is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CategoryKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
