pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{CityDirectory, Config, SearchConfig};
pub use error::{DiscoveryError, Result};
pub use services::compatibility::{CompatibilityScorer, ScoringWeights, TasteTables};
pub use services::search::SearchRanker;
pub use utils::geo::haversine_km;
pub use utils::text::{levenshtein, similarity};
