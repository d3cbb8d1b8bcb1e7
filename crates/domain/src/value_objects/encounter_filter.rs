//! Encounter filter criteria
//!
//! Describes which catalog monsters are eligible for an encounter table.
//! Stored verbatim on the table so regeneration and replacement reuse it.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lowest challenge level a filter may request
pub const MIN_CHALLENGE_LEVEL: u8 = 1;
/// Highest challenge level a filter may request
pub const MAX_CHALLENGE_LEVEL: u8 = 20;
/// Maximum length of the free-text search query
pub const MAX_SEARCH_QUERY_LENGTH: usize = 100;

/// Monster pool a filter draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonsterSource {
    /// Published rulebook monsters
    #[serde(rename = "official")]
    Official,
    /// Custom monsters authored by the caller
    #[serde(rename = "user")]
    UserOwned,
    /// Custom monsters other users have made public
    #[serde(rename = "public")]
    PublicCommunity,
    /// Monsters the caller has favorited (requires identity)
    #[serde(rename = "favorites")]
    Favorites,
}

impl MonsterSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::UserOwned => "user",
            Self::PublicCommunity => "public",
            Self::Favorites => "favorites",
        }
    }
}

impl fmt::Display for MonsterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonsterSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "official" => Ok(Self::Official),
            "user" | "user-owned" | "mine" => Ok(Self::UserOwned),
            "public" | "community" => Ok(Self::PublicCommunity),
            "favorites" | "favourites" => Ok(Self::Favorites),
            other => Err(DomainError::parse(format!("Unknown monster source: {}", other))),
        }
    }
}

/// Which monsters are eligible for an encounter table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// At least one source must be selected
    pub sources: BTreeSet<MonsterSource>,
    /// Inclusive challenge-level band
    #[serde(default = "default_level_min")]
    pub level_min: u8,
    #[serde(default = "default_level_max")]
    pub level_max: u8,
    /// Movement tags (fly, swim, burrow, climb); empty means no movement filter
    #[serde(default)]
    pub movement_types: BTreeSet<String>,
    #[serde(default)]
    pub search_query: Option<String>,
}

fn default_level_min() -> u8 {
    MIN_CHALLENGE_LEVEL
}

fn default_level_max() -> u8 {
    MAX_CHALLENGE_LEVEL
}

impl FilterCriteria {
    /// Filter over the given sources with the full level band.
    pub fn new(sources: impl IntoIterator<Item = MonsterSource>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
            level_min: MIN_CHALLENGE_LEVEL,
            level_max: MAX_CHALLENGE_LEVEL,
            movement_types: BTreeSet::new(),
            search_query: None,
        }
    }

    pub fn with_levels(mut self, level_min: u8, level_max: u8) -> Self {
        self.level_min = level_min;
        self.level_max = level_max;
        self
    }

    pub fn with_movement(mut self, movement: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.movement_types = movement.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Check every filter invariant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - No source is selected
    /// - A level bound is outside 1..=20 or `level_min > level_max`
    /// - The search query exceeds 100 characters
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.sources.is_empty() {
            return Err(DomainError::validation(
                "At least one monster source required",
            ));
        }
        for level in [self.level_min, self.level_max] {
            if !(MIN_CHALLENGE_LEVEL..=MAX_CHALLENGE_LEVEL).contains(&level) {
                return Err(DomainError::validation(format!(
                    "Challenge level must be between {} and {}",
                    MIN_CHALLENGE_LEVEL, MAX_CHALLENGE_LEVEL
                )));
            }
        }
        if self.level_min > self.level_max {
            return Err(DomainError::validation(
                "Minimum level must be less than or equal to maximum level",
            ));
        }
        if let Some(query) = &self.search_query {
            if query.chars().count() > MAX_SEARCH_QUERY_LENGTH {
                return Err(DomainError::validation(format!(
                    "Search query cannot exceed {} characters",
                    MAX_SEARCH_QUERY_LENGTH
                )));
            }
        }
        Ok(())
    }

    pub fn includes_favorites(&self) -> bool {
        self.sources.contains(&MonsterSource::Favorites)
    }

    /// The trimmed search term, or `None` when absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    pub fn level_contains(&self, level: u8) -> bool {
        (self.level_min..=self.level_max).contains(&level)
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::new([MonsterSource::Official])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_valid() {
        assert!(FilterCriteria::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_sources() {
        let filter = FilterCriteria::new([]);
        assert!(matches!(filter.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn rejects_inverted_level_band() {
        let filter = FilterCriteria::default().with_levels(5, 3);
        assert!(filter.validate().is_err());
    }

    #[test]
    fn rejects_levels_outside_band() {
        assert!(FilterCriteria::default().with_levels(0, 3).validate().is_err());
        assert!(FilterCriteria::default().with_levels(1, 21).validate().is_err());
    }

    #[test]
    fn rejects_long_search_query() {
        let filter = FilterCriteria::default().with_search("x".repeat(101));
        assert!(filter.validate().is_err());
    }

    #[test]
    fn blank_search_is_absent() {
        let filter = FilterCriteria::default().with_search("   ");
        assert_eq!(filter.search_term(), None);

        let filter = FilterCriteria::default().with_search("  wolf ");
        assert_eq!(filter.search_term(), Some("wolf"));
    }

    #[test]
    fn sources_use_short_wire_names() {
        let filter = FilterCriteria::new([MonsterSource::UserOwned, MonsterSource::Favorites]);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["sources"], serde_json::json!(["user", "favorites"]));
    }

    #[test]
    fn missing_levels_default_to_full_band() {
        let filter: FilterCriteria = serde_json::from_str(r#"{"sources":["public"]}"#).unwrap();
        assert_eq!(filter.level_min, 1);
        assert_eq!(filter.level_max, 20);
        assert!(filter.movement_types.is_empty());
    }

    #[test]
    fn parses_source_names() {
        assert_eq!("Official".parse::<MonsterSource>().unwrap(), MonsterSource::Official);
        assert_eq!("community".parse::<MonsterSource>().unwrap(), MonsterSource::PublicCommunity);
        assert!("homebrew".parse::<MonsterSource>().is_err());
    }
}
