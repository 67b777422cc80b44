use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reading lifecycle of one user's copy of a catalog book. Mutated by
/// the owning user only, outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingState {
    WantToRead,
    CurrentlyReading,
    Read,
}

impl ReadingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingState::WantToRead => "want-to-read",
            ReadingState::CurrentlyReading => "currently-reading",
            ReadingState::Read => "read",
        }
    }

    /// A copy is offerable for swapping unless its owner is mid-read.
    pub fn is_offerable(&self) -> bool {
        !matches!(self, ReadingState::CurrentlyReading)
    }
}

/// One user's copy/claim of a catalog book, denormalized for display
/// and search. Rating and review are only meaningful once `state` is
/// `Read`; the core tolerates empty author lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedBookRecord {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub cover_url: Option<String>,
    pub state: ReadingState,
    /// 1-5, absent while unrated.
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub added_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Minimal public projection of a user, attached to search results and
/// used as the join source for owner lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub display_name: String,
    pub city: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A user's declared taste signals, independent of any one book. All
/// list fields may be empty; scoring degrades to zero rather than
/// erroring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub city: String,
    pub coordinates: Option<GeoPoint>,
    pub favorite_genres: Vec<String>,
    pub favorite_authors: Vec<String>,
    pub interests: Vec<String>,
    /// Used only for its length, as a weak intellectual signal.
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Title,
    Author,
    Rating,
    DateAdded,
    Distance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Free-text search criteria. Every field is optional; absent fields
/// skip their filter stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub city: Option<String>,
    pub owner: Option<String>,
    pub min_rating: Option<u8>,
    /// Kilometers. Also bounds the nearby sub-list when set.
    pub max_distance: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub available_only: bool,
    pub nearby_only: bool,
}

/// Read-only projection constructed fresh per query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub book: OwnedBookRecord,
    pub owner: UserSummary,
    /// Whole kilometers from the requester to the owner's city; absent
    /// when no requester coordinates were supplied.
    pub distance_km: Option<u32>,
    pub match_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub results: Vec<SearchResultItem>,
    pub total_results: usize,
    /// Distance-sorted subset within the nearby radius, capped. Derived
    /// from the filtered result list, not the raw catalog.
    pub nearby_results: Vec<SearchResultItem>,
}

/// Coarse bucket derived from thresholding the overall compatibility
/// score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationTier {
    High,
    Medium,
    Low,
}

impl RecommendationTier {
    pub fn for_score(score: f32) -> Self {
        if score >= 0.75 {
            RecommendationTier::High
        } else if score >= 0.50 {
            RecommendationTier::Medium
        } else {
            RecommendationTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationTier::High => "high",
            RecommendationTier::Medium => "medium",
            RecommendationTier::Low => "low",
        }
    }
}

/// Multi-factor compatibility between two profiles. All scores live in
/// [0, 1]; `overall_score` is rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub overall_score: f32,
    pub genre_score: f32,
    pub interest_score: f32,
    pub author_score: f32,
    pub intellectual_score: f32,
    pub reading_pattern_score: f32,
    /// Human-readable match reasons, in trigger order.
    pub match_reasons: Vec<String>,
    pub tier: RecommendationTier,
}

impl CompatibilityResult {
    /// The degraded result for missing or signal-free profiles.
    pub fn zero() -> Self {
        Self {
            overall_score: 0.0,
            genre_score: 0.0,
            interest_score: 0.0,
            author_score: 0.0,
            intellectual_score: 0.0,
            reading_pattern_score: 0.0,
            match_reasons: Vec::new(),
            tier: RecommendationTier::Low,
        }
    }
}

/// A candidate profile paired with its compatibility against the rank
/// target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProfile {
    pub profile: UserProfile,
    pub compatibility: CompatibilityResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_state_serde_kebab_case() {
        let json = serde_json::to_string(&ReadingState::WantToRead).unwrap();
        assert_eq!(json, "\"want-to-read\"");

        let state: ReadingState = serde_json::from_str("\"currently-reading\"").unwrap();
        assert_eq!(state, ReadingState::CurrentlyReading);
    }

    #[test]
    fn test_offerable_states() {
        assert!(ReadingState::Read.is_offerable());
        assert!(ReadingState::WantToRead.is_offerable());
        assert!(!ReadingState::CurrentlyReading.is_offerable());
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(RecommendationTier::for_score(0.75), RecommendationTier::High);
        assert_eq!(RecommendationTier::for_score(0.74), RecommendationTier::Medium);
        assert_eq!(RecommendationTier::for_score(0.50), RecommendationTier::Medium);
        assert_eq!(RecommendationTier::for_score(0.49), RecommendationTier::Low);
        assert_eq!(RecommendationTier::for_score(0.0), RecommendationTier::Low);
    }

    #[test]
    fn test_sort_field_serde_camel_case() {
        let json = serde_json::to_string(&SortField::DateAdded).unwrap();
        assert_eq!(json, "\"dateAdded\"");
    }

    #[test]
    fn test_filter_defaults() {
        let filters = SearchFilters::default();
        assert_eq!(filters.sort_by, SortField::Title);
        assert_eq!(filters.sort_order, SortOrder::Asc);
        assert!(!filters.available_only);
        assert!(!filters.nearby_only);
    }
}
