use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// Category name carrying the intellectual-interest signal.
pub const INTELLECTUAL_CATEGORY: &str = "entelektüel";

/// Relative contribution of each compatibility factor to the overall
/// score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub genre: f32,
    pub interest: f32,
    pub author: f32,
    pub intellectual: f32,
    pub pattern: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            genre: 0.25,
            interest: 0.30,
            author: 0.20,
            intellectual: 0.15,
            pattern: 0.10,
        }
    }
}

impl ScoringWeights {
    /// Reject weight sets that cannot produce a [0, 1] overall score.
    pub fn validate(&self) -> Result<()> {
        let parts = [
            self.genre,
            self.interest,
            self.author,
            self.intellectual,
            self.pattern,
        ];
        if parts.iter().any(|w| *w < 0.0) {
            return Err(DiscoveryError::Validation(
                "factor weights must be non-negative".to_string(),
            ));
        }
        let total: f32 = parts.iter().sum();
        if (total - 1.0).abs() > 1e-3 {
            return Err(DiscoveryError::Validation(format!(
                "factor weights must sum to 1.0, got {}",
                total
            )));
        }
        Ok(())
    }
}

/// One interest bucket: display name, weight, and the lowercase
/// interest labels it covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestCategory {
    pub name: String,
    pub weight: f32,
    pub members: HashSet<String>,
}

/// The fixed taste lookup tables: per-genre weights, per-author
/// influence, interest buckets, and the genre subset counted as
/// intellectual. Swappable wholesale via
/// `CompatibilityScorer::with_tables` without touching the algorithms.
#[derive(Debug, Clone)]
pub struct TasteTables {
    pub genre_weights: HashMap<String, f32>,
    pub author_influence: HashMap<String, f32>,
    pub interest_categories: Vec<InterestCategory>,
    pub intellectual_genres: HashSet<String>,
}

impl TasteTables {
    /// Unlisted genres carry neutral weight.
    pub fn genre_weight(&self, genre: &str) -> f32 {
        self.genre_weights.get(genre).copied().unwrap_or(1.0)
    }

    /// Unlisted authors carry neutral influence.
    pub fn author_weight(&self, author: &str) -> f32 {
        self.author_influence.get(author).copied().unwrap_or(1.0)
    }

    pub fn intellectual_category(&self) -> Option<&InterestCategory> {
        self.interest_categories
            .iter()
            .find(|category| category.name == INTELLECTUAL_CATEGORY)
    }
}

impl Default for TasteTables {
    fn default() -> Self {
        DEFAULT_TABLES.clone()
    }
}

static DEFAULT_TABLES: Lazy<TasteTables> = Lazy::new(|| TasteTables {
    // Genres carrying more intellectual weight score up to 1.3x,
    // lighter genres down to 0.5x.
    genre_weights: weight_map(&[
        ("Felsefi", 1.3),
        ("Şiir", 1.3),
        ("Deneme", 1.25),
        ("Klasik", 1.2),
        ("Bilim", 1.2),
        ("Tarih", 1.15),
        ("Psikolojik", 1.1),
        ("Biyografi", 1.05),
        ("Roman", 1.0),
        ("Bilim Kurgu", 0.95),
        ("Fantastik", 0.85),
        ("Polisiye", 0.8),
        ("Macera", 0.7),
        ("Gezi", 0.6),
        ("Mizah", 0.55),
        ("Çizgi Roman", 0.5),
    ]),
    author_influence: weight_map(&[
        ("Fyodor Dostoyevski", 1.7),
        ("Lev Tolstoy", 1.6),
        ("Franz Kafka", 1.6),
        ("Friedrich Nietzsche", 1.6),
        ("Orhan Pamuk", 1.5),
        ("Oğuz Atay", 1.5),
        ("Ahmet Hamdi Tanpınar", 1.5),
        ("Albert Camus", 1.5),
        ("Virginia Woolf", 1.5),
        ("Jorge Luis Borges", 1.5),
        ("Sabahattin Ali", 1.4),
        ("Yaşar Kemal", 1.4),
        ("Stefan Zweig", 1.4),
        ("George Orwell", 1.4),
        ("İhsan Oktay Anar", 1.3),
        ("Ursula K. Le Guin", 1.3),
    ]),
    interest_categories: vec![
        category(
            INTELLECTUAL_CATEGORY,
            1.3,
            &["felsefe", "edebiyat", "şiir", "tarih", "bilim", "sanat tarihi"],
        ),
        category(
            "öğrenme",
            1.25,
            &["yabancı dil", "yazılım", "astronomi", "psikoloji", "arkeoloji", "satranç"],
        ),
        category(
            "yaratıcı",
            1.1,
            &["yazarlık", "fotoğrafçılık", "resim", "müzik", "seramik"],
        ),
        category(
            "sosyal",
            1.0,
            &["gönüllülük", "kitap kulübü", "tiyatro", "seyahat", "kahve"],
        ),
        category(
            "sağlık",
            0.9,
            &["yoga", "koşu", "doğa yürüyüşü", "meditasyon", "yüzme"],
        ),
        category(
            "yaşam",
            0.7,
            &["yemek", "moda", "bahçe", "oyun", "alışveriş"],
        ),
    ],
    intellectual_genres: label_set(&["Felsefi", "Şiir", "Deneme", "Klasik", "Bilim", "Tarih"]),
});

fn weight_map(entries: &[(&str, f32)]) -> HashMap<String, f32> {
    entries
        .iter()
        .map(|(label, weight)| (label.to_string(), *weight))
        .collect()
}

fn label_set(labels: &[&str]) -> HashSet<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

fn category(name: &str, weight: f32, members: &[&str]) -> InterestCategory {
    InterestCategory {
        name: name.to_string(),
        weight,
        members: label_set(members),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        ScoringWeights::default().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let weights = ScoringWeights {
            genre: -0.1,
            interest: 0.45,
            author: 0.20,
            intellectual: 0.15,
            pattern: 0.30,
        };
        assert!(matches!(
            weights.validate(),
            Err(DiscoveryError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_sum() {
        let weights = ScoringWeights {
            genre: 0.5,
            interest: 0.5,
            author: 0.5,
            intellectual: 0.0,
            pattern: 0.0,
        };
        assert!(matches!(
            weights.validate(),
            Err(DiscoveryError::Validation(_))
        ));
    }

    #[test]
    fn test_genre_weight_fallback() {
        let tables = TasteTables::default();
        assert!(tables.genre_weight("Felsefi") > 1.0);
        assert!(tables.genre_weight("Çizgi Roman") < 1.0);
        assert_eq!(tables.genre_weight("Western"), 1.0);
    }

    #[test]
    fn test_author_influence_fallback() {
        let tables = TasteTables::default();
        assert!(tables.author_weight("Fyodor Dostoyevski") > 1.5);
        assert_eq!(tables.author_weight("Bilinmeyen Yazar"), 1.0);
    }

    #[test]
    fn test_intellectual_category_present() {
        let tables = TasteTables::default();
        let category = tables.intellectual_category().unwrap();
        assert!(category.members.contains("felsefe"));
        assert!(category.weight > 1.0);
    }
}
