//! Pairwise profile-compatibility scoring.
//!
//! Combines five taste signals (genres, interests, authors,
//! intellectual markers, reading-pattern shape) into a weighted [0, 1]
//! score with a coarse recommendation tier. Every operation is a pure
//! function of its inputs.

mod weights;

pub use weights::{InterestCategory, ScoringWeights, TasteTables, INTELLECTUAL_CATEGORY};

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::{CompatibilityResult, RecommendationTier, ScoredProfile, UserProfile};
use crate::utils::text::turkish_lower;

pub struct CompatibilityScorer {
    tables: TasteTables,
    weights: ScoringWeights,
}

impl Default for CompatibilityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatibilityScorer {
    /// Scorer with the built-in tables and factor weights.
    pub fn new() -> Self {
        Self {
            tables: TasteTables::default(),
            weights: ScoringWeights::default(),
        }
    }

    pub fn with_tables(tables: TasteTables, weights: ScoringWeights) -> Self {
        Self { tables, weights }
    }

    /// Score two profiles. A missing profile on either side, or two
    /// profiles carrying no taste signals at all, yields the zero
    /// result instead of an error.
    pub fn score(
        &self,
        a: Option<&UserProfile>,
        b: Option<&UserProfile>,
    ) -> CompatibilityResult {
        let (a, b) = match (a, b) {
            (Some(a), Some(b)) => (a, b),
            _ => return CompatibilityResult::zero(),
        };
        if is_blank(a) && is_blank(b) {
            return CompatibilityResult::zero();
        }

        let genres_a = label_set(&a.favorite_genres);
        let genres_b = label_set(&b.favorite_genres);
        let authors_a = label_set(&a.favorite_authors);
        let authors_b = label_set(&b.favorite_authors);
        let interests_a = folded_set(&a.interests);
        let interests_b = folded_set(&b.interests);

        let common_genres = genres_a.intersection(&genres_b).count();
        let common_interests = interests_a.intersection(&interests_b).count();
        let common_authors = authors_a.intersection(&authors_b).count();

        let genre_score = self.genre_score(&genres_a, &genres_b);
        let interest_score = self.interest_score(&interests_a, &interests_b);
        let author_score = self.author_score(&authors_a, &authors_b);
        let intellectual_score =
            self.intellectual_score(a, b, &genres_a, &genres_b, &interests_a, &interests_b);
        let reading_pattern_score = reading_pattern_score(a, b);

        let overall = self.weights.genre * genre_score
            + self.weights.interest * interest_score
            + self.weights.author * author_score
            + self.weights.intellectual * intellectual_score
            + self.weights.pattern * reading_pattern_score;
        let overall_score = round2(overall);

        let mut match_reasons = Vec::new();
        if common_genres > 0 {
            match_reasons.push(format!("{} ortak tür", common_genres));
        }
        if common_interests > 0 {
            match_reasons.push(format!("{} ortak ilgi alanı", common_interests));
        }
        if common_authors > 0 {
            match_reasons.push(format!("{} ortak yazar", common_authors));
        }
        if intellectual_score > 0.7 {
            match_reasons.push("Benzer entelektüel seviye".to_string());
        }
        if reading_pattern_score > 0.6 {
            match_reasons.push("Benzer okuma tercihleri".to_string());
        }

        let tier = RecommendationTier::for_score(overall_score);

        debug!(
            user_a = %a.user_id,
            user_b = %b.user_id,
            overall = overall_score,
            tier = tier.as_str(),
            "Compatibility scored"
        );

        CompatibilityResult {
            overall_score,
            genre_score,
            interest_score,
            author_score,
            intellectual_score,
            reading_pattern_score,
            match_reasons,
            tier,
        }
    }

    /// Rank candidates by compatibility with the target, best first.
    /// Ties keep the candidates' input order.
    pub fn rank(&self, target: &UserProfile, candidates: &[UserProfile]) -> Vec<ScoredProfile> {
        let mut scored: Vec<ScoredProfile> = candidates
            .iter()
            .map(|candidate| ScoredProfile {
                profile: candidate.clone(),
                compatibility: self.score(Some(target), Some(candidate)),
            })
            .collect();

        scored.sort_by(|x, y| {
            y.compatibility
                .overall_score
                .partial_cmp(&x.compatibility.overall_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            target = %target.user_id,
            candidate_count = candidates.len(),
            top_score = scored.first().map(|s| s.compatibility.overall_score),
            "Candidates ranked by compatibility"
        );

        scored
    }

    /// Weighted common-genre overlap, normalized by the larger genre
    /// set.
    fn genre_score(&self, a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f32 {
        let weighted: f32 = a
            .intersection(b)
            .map(|genre| self.tables.genre_weight(genre))
            .sum();
        if weighted == 0.0 {
            return 0.0;
        }
        let larger = a.len().max(b.len()) as f32;
        (weighted / larger).min(1.0)
    }

    /// Category-bucketed interest overlap. Interests outside every
    /// bucket contribute nothing to either side of the ratio.
    fn interest_score(&self, a: &BTreeSet<String>, b: &BTreeSet<String>) -> f32 {
        let mut numerator = 0.0f32;
        let mut denominator = 0.0f32;

        for category in &self.tables.interest_categories {
            let in_a = a.iter().filter(|i| category.members.contains(*i)).count();
            let in_b = b.iter().filter(|i| category.members.contains(*i)).count();
            let overlap = a
                .intersection(b)
                .filter(|i| category.members.contains(*i))
                .count();

            numerator += overlap as f32 * category.weight;
            denominator += in_a.max(in_b) as f32 * category.weight;
        }

        if denominator == 0.0 {
            0.0
        } else {
            (numerator / denominator).min(1.0)
        }
    }

    /// Influence-weighted common authors over the union, doubled:
    /// shared authors are rarer and more diagnostic than shared genres.
    fn author_score(&self, a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f32 {
        if a.intersection(b).next().is_none() {
            return 0.0;
        }
        let common: f32 = a
            .intersection(b)
            .map(|author| self.tables.author_weight(author))
            .sum();
        let union: f32 = a
            .union(b)
            .map(|author| self.tables.author_weight(author))
            .sum();
        if union == 0.0 {
            return 0.0;
        }
        (common / union * 2.0).min(1.0)
    }

    /// Three fixed-share signals averaged over a constant divisor of 3.
    /// The biography term degrades to 0 when either bio is absent, it
    /// is not excluded from the divisor.
    fn intellectual_score(
        &self,
        a: &UserProfile,
        b: &UserProfile,
        genres_a: &BTreeSet<&str>,
        genres_b: &BTreeSet<&str>,
        interests_a: &BTreeSet<String>,
        interests_b: &BTreeSet<String>,
    ) -> f32 {
        let mut total = 0.0f32;

        let intellectual_genres = &self.tables.intellectual_genres;
        let has_genre_signal =
            |set: &BTreeSet<&str>| set.iter().any(|g| intellectual_genres.contains(*g));
        if has_genre_signal(genres_a) && has_genre_signal(genres_b) {
            total += 0.4;
        }

        if let Some(category) = self.tables.intellectual_category() {
            let has_interest_signal =
                |set: &BTreeSet<String>| set.iter().any(|i| category.members.contains(i));
            if has_interest_signal(interests_a) && has_interest_signal(interests_b) {
                total += 0.3;
            }
        }

        let len_a = bio_len(a);
        let len_b = bio_len(b);
        if len_a > 0 && len_b > 0 {
            let longer = len_a.max(len_b) as f32;
            total += 0.3 * (1.0 - (len_a as f32 - len_b as f32).abs() / longer);
        }

        total / 3.0
    }
}

/// Average shape similarity of the three taste lists, each term
/// normalized by the larger length (floored at 1 against division by
/// zero).
fn reading_pattern_score(a: &UserProfile, b: &UserProfile) -> f32 {
    let pairs = [
        (a.favorite_genres.len(), b.favorite_genres.len()),
        (a.favorite_authors.len(), b.favorite_authors.len()),
        (a.interests.len(), b.interests.len()),
    ];

    let total: f32 = pairs
        .iter()
        .map(|&(x, y)| {
            let norm = x.max(y).max(1) as f32;
            1.0 - (x as f32 - y as f32).abs() / norm
        })
        .sum();
    total / pairs.len() as f32
}

fn is_blank(profile: &UserProfile) -> bool {
    profile.favorite_genres.is_empty()
        && profile.favorite_authors.is_empty()
        && profile.interests.is_empty()
        && bio_len(profile) == 0
}

fn bio_len(profile: &UserProfile) -> usize {
    profile
        .bio
        .as_deref()
        .map(|bio| bio.chars().count())
        .unwrap_or(0)
}

/// Duplicates and surrounding whitespace are ignored; matching is
/// exact otherwise.
fn label_set(labels: &[String]) -> BTreeSet<&str> {
    labels
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .collect()
}

/// Interests are bucketed case-insensitively.
fn folded_set(labels: &[String]) -> BTreeSet<String> {
    labels
        .iter()
        .map(|label| turkish_lower(label.trim()))
        .filter(|label| !label.is_empty())
        .collect()
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
