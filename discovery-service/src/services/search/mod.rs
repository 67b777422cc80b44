//! Book/owner search pipeline: base filter, owner join, distance
//! computation, secondary filters, sort, nearby sub-list.
//!
//! Pure function of its inputs. Catalogs are caller-supplied slices;
//! nothing is cached or mutated.

use tracing::debug;

use crate::config::{CityDirectory, SearchConfig};
use crate::models::{
    GeoPoint, OwnedBookRecord, SearchCriteria, SearchFilters, SearchOutcome, SearchResultItem,
    SortField, SortOrder, UserSummary,
};
use crate::utils::geo::haversine_km;
use crate::utils::text::{turkish_cmp, turkish_lower};

/// Display name attached to results whose owner is missing from the
/// user directory.
const UNKNOWN_OWNER: &str = "Bilinmeyen Kullanıcı";

pub struct SearchRanker {
    cities: CityDirectory,
    config: SearchConfig,
}

impl Default for SearchRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchRanker {
    /// Ranker with the built-in city table and defaults.
    pub fn new() -> Self {
        Self {
            cities: CityDirectory::default(),
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(cities: CityDirectory, config: SearchConfig) -> Self {
        Self { cities, config }
    }

    /// Run the full pipeline for one query.
    ///
    /// `requester_coords` being absent skips the distance stage
    /// entirely: no result carries a distance and the nearby list comes
    /// back empty. An empty result set is a valid output, not an error.
    pub fn search(
        &self,
        books: &[OwnedBookRecord],
        users: &[UserSummary],
        criteria: &SearchCriteria,
        filters: &SearchFilters,
        requesting_user_id: &str,
        requester_coords: Option<GeoPoint>,
    ) -> SearchOutcome {
        let candidates = base_filter(books, criteria, requesting_user_id);
        let mut results = attach_owners(candidates, users);

        if let Some(origin) = requester_coords {
            self.compute_distances(&mut results, origin);
        }

        let mut results =
            self.apply_secondary_filters(results, criteria, filters, requester_coords.is_some());
        self.sort_results(&mut results, filters);

        let nearby_results = self.derive_nearby(&results, criteria);

        debug!(
            candidate_count = books.len(),
            result_count = results.len(),
            nearby_count = nearby_results.len(),
            "Search ranking completed"
        );

        SearchOutcome {
            total_results: results.len(),
            results,
            nearby_results,
        }
    }

    /// Map each owner's city through the directory and measure from the
    /// requester. Unknown cities resolve to the default city rather
    /// than dropping the record.
    fn compute_distances(&self, results: &mut [SearchResultItem], origin: GeoPoint) {
        for item in results.iter_mut() {
            let city_coords = self.cities.resolve(&item.owner.city);
            item.distance_km = Some(haversine_km(origin, city_coords));
        }
    }

    fn apply_secondary_filters(
        &self,
        results: Vec<SearchResultItem>,
        criteria: &SearchCriteria,
        filters: &SearchFilters,
        has_origin: bool,
    ) -> Vec<SearchResultItem> {
        let radius = criteria
            .max_distance
            .unwrap_or(self.config.default_radius_km);

        results
            .into_iter()
            .filter(|item| match (item.distance_km, criteria.max_distance) {
                (Some(distance), Some(limit)) => distance <= limit,
                // Undistanced results pass through the distance filter.
                _ => true,
            })
            .filter(|item| !filters.available_only || item.book.state.is_offerable())
            .filter(|item| match criteria.city.as_deref() {
                Some(city) if !city.is_empty() => item.owner.city == city,
                _ => true,
            })
            .filter(|item| {
                matches_substring(&criteria.owner, |needle| {
                    turkish_lower(&item.owner.display_name).contains(needle)
                })
            })
            .filter(|item| {
                if !(filters.nearby_only && has_origin) {
                    return true;
                }
                item.distance_km.map(|d| d <= radius).unwrap_or(false)
            })
            .collect()
    }

    fn sort_results(&self, results: &mut [SearchResultItem], filters: &SearchFilters) {
        // sort_by is stable, so equal keys keep their pipeline order.
        results.sort_by(|a, b| {
            let ordering = match filters.sort_by {
                SortField::Title => turkish_cmp(&a.book.title, &b.book.title),
                SortField::Author => turkish_cmp(&author_key(&a.book), &author_key(&b.book)),
                SortField::Rating => {
                    let ra = a.book.rating.unwrap_or(0);
                    let rb = b.book.rating.unwrap_or(0);
                    ra.cmp(&rb)
                }
                SortField::DateAdded => a.book.added_at.cmp(&b.book.added_at),
                SortField::Distance => {
                    // Undistanced results sort last ascending.
                    let da = a.distance_km.map(u64::from).unwrap_or(u64::MAX);
                    let db = b.distance_km.map(u64::from).unwrap_or(u64::MAX);
                    da.cmp(&db)
                }
            };
            match filters.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    /// Re-filter the sorted result list down to defined distances
    /// within the radius, closest first, capped. A record excluded from
    /// the main results by any filter never reappears here.
    fn derive_nearby(
        &self,
        results: &[SearchResultItem],
        criteria: &SearchCriteria,
    ) -> Vec<SearchResultItem> {
        let radius = criteria
            .max_distance
            .unwrap_or(self.config.default_radius_km);

        let mut nearby: Vec<SearchResultItem> = results
            .iter()
            .filter(|item| item.distance_km.map(|d| d <= radius).unwrap_or(false))
            .cloned()
            .collect();
        nearby.sort_by_key(|item| item.distance_km);
        nearby.truncate(self.config.nearby_limit);
        nearby
    }
}

fn base_filter<'a>(
    books: &'a [OwnedBookRecord],
    criteria: &SearchCriteria,
    requesting_user_id: &str,
) -> Vec<&'a OwnedBookRecord> {
    books
        .iter()
        .filter(|book| book.user_id != requesting_user_id)
        .filter(|book| match criteria.query.as_deref() {
            Some(query) if !query.is_empty() => {
                let needle = turkish_lower(query);
                turkish_lower(&book.title).contains(&needle)
                    || book
                        .authors
                        .iter()
                        .any(|author| turkish_lower(author).contains(&needle))
            }
            _ => true,
        })
        .filter(|book| {
            matches_substring(&criteria.author, |needle| {
                book.authors
                    .iter()
                    .any(|author| turkish_lower(author).contains(needle))
            })
        })
        .filter(|book| {
            matches_substring(&criteria.title, |needle| {
                turkish_lower(&book.title).contains(needle)
            })
        })
        .filter(|book| match criteria.min_rating {
            // Unrated copies never pass a rating floor.
            Some(min) => book.rating.map(|r| r >= min).unwrap_or(false),
            None => true,
        })
        .collect()
}

fn attach_owners(books: Vec<&OwnedBookRecord>, users: &[UserSummary]) -> Vec<SearchResultItem> {
    books
        .into_iter()
        .map(|book| {
            let owner = users
                .iter()
                .find(|user| user.id == book.user_id)
                .cloned()
                .unwrap_or_else(|| UserSummary {
                    id: book.user_id.clone(),
                    display_name: UNKNOWN_OWNER.to_string(),
                    city: String::new(),
                    avatar_url: None,
                });

            SearchResultItem {
                book: book.clone(),
                owner,
                distance_km: None,
                // Current filters are boolean, not fuzzy; reserved for
                // fuzzy scoring.
                match_score: 1.0,
            }
        })
        .collect()
}

/// An absent or empty filter matches everything; otherwise the
/// lowercased needle is handed to the predicate.
fn matches_substring(filter: &Option<String>, pred: impl Fn(&str) -> bool) -> bool {
    match filter.as_deref() {
        Some(raw) if !raw.is_empty() => pred(&turkish_lower(raw)),
        _ => true,
    }
}

fn author_key(book: &OwnedBookRecord) -> String {
    book.authors.join(", ")
}
