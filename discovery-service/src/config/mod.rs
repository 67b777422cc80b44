use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::{DiscoveryError, Result};
use crate::models::GeoPoint;

/// City used when an owner's city is missing from the directory.
pub const DEFAULT_CITY: &str = "İstanbul";

static DEFAULT_CITY_COORDS: Lazy<Vec<(&'static str, GeoPoint)>> = Lazy::new(|| {
    vec![
        ("İstanbul", GeoPoint { lat: 41.0082, lon: 28.9784 }),
        ("Ankara", GeoPoint { lat: 39.9334, lon: 32.8597 }),
        ("İzmir", GeoPoint { lat: 38.4192, lon: 27.1287 }),
        ("Bursa", GeoPoint { lat: 40.1885, lon: 29.0610 }),
        ("Antalya", GeoPoint { lat: 36.8969, lon: 30.7133 }),
        ("Adana", GeoPoint { lat: 37.0000, lon: 35.3213 }),
        ("Konya", GeoPoint { lat: 37.8667, lon: 32.4833 }),
        ("Gaziantep", GeoPoint { lat: 37.0662, lon: 37.3833 }),
        ("Eskişehir", GeoPoint { lat: 39.7767, lon: 30.5206 }),
        ("Trabzon", GeoPoint { lat: 41.0015, lon: 39.7178 }),
    ]
});

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Radius for the nearby sub-list when the criteria carry no
    /// explicit max distance.
    pub default_radius_km: u32,
    /// Cap on the nearby sub-list length.
    pub nearby_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_km: 50,
            nearby_limit: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            search: SearchConfig {
                default_radius_km: env_or("DISCOVERY_DEFAULT_RADIUS_KM", 50)?,
                nearby_limit: env_or("DISCOVERY_NEARBY_LIMIT", 5)?,
            },
        })
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| {
            DiscoveryError::InvalidConfig(format!("{} must be a valid number, got {:?}", key, raw))
        }),
        Err(_) => Ok(default),
    }
}

/// Fixed city-to-coordinate lookup. Unknown city names resolve to the
/// default city's coordinates; resolution never fails.
#[derive(Debug, Clone)]
pub struct CityDirectory {
    coords: HashMap<String, GeoPoint>,
    default_city: String,
}

impl CityDirectory {
    pub fn new(coords: HashMap<String, GeoPoint>, default_city: impl Into<String>) -> Result<Self> {
        let default_city = default_city.into();
        if !coords.contains_key(&default_city) {
            return Err(DiscoveryError::InvalidConfig(format!(
                "default city {:?} is missing from the city table",
                default_city
            )));
        }
        Ok(Self {
            coords,
            default_city,
        })
    }

    pub fn resolve(&self, city: &str) -> GeoPoint {
        self.coords
            .get(city)
            .copied()
            .unwrap_or_else(|| self.coords[&self.default_city])
    }

    pub fn contains(&self, city: &str) -> bool {
        self.coords.contains_key(city)
    }
}

impl Default for CityDirectory {
    fn default() -> Self {
        let coords = DEFAULT_CITY_COORDS
            .iter()
            .map(|(name, point)| (name.to_string(), *point))
            .collect();
        Self {
            coords,
            default_city: DEFAULT_CITY.to_string(),
        }
    }
}
