//! Place directory: search, lookup and nearby queries over the store,
//! with the place list cached in memory.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join;
use tracing::{debug, info, warn};

use crate::domain::{Coordinate, Place, PlaceId, haversine_km};
use crate::itinerary::PlaceLookup;

use super::cache::PlaceCache;
use super::error::PlaceError;
use super::normalize::fold_name;
use super::rank::{dedup_by_id, rank_places};
use super::store::{NearbyPlace, PlaceStore};

/// How many store rows to fetch per requested result, so ranking has
/// enough candidates to find the exact match.
const SEARCH_OVERFETCH: usize = 4;

/// Upper bound on rows fetched for a single search.
const MAX_SEARCH_ROWS: usize = 200;

/// Resolves place names and ids, backed by a [`PlaceStore`].
pub struct PlaceDirectory {
    store: Arc<dyn PlaceStore>,
    cache: PlaceCache,
}

impl PlaceDirectory {
    pub fn new(store: Arc<dyn PlaceStore>, cache: PlaceCache) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &PlaceCache {
        &self.cache
    }

    /// Search places by free text.
    ///
    /// Matching is accent-insensitive; results keep their accented names.
    /// A blank query, no matches, or a store failure all give an empty list.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<Place> {
        let folded = fold_name(query);
        if folded.is_empty() || limit == 0 {
            return Vec::new();
        }

        let fetch = (limit * SEARCH_OVERFETCH).min(MAX_SEARCH_ROWS);

        // The contains query is cut by population, so exact matches are
        // fetched separately and placed ahead of it.
        let (exact, contained) = join(
            self.store.search_exact_name(&folded, limit),
            self.store.search_by_name(&folded, fetch),
        )
        .await;

        let exact = exact.unwrap_or_else(|e| {
            warn!(query, error = %e, "exact place search failed");
            Vec::new()
        });

        let rows = match contained {
            Ok(rows) if !rows.is_empty() || !exact.is_empty() => rows,
            Ok(_) => match self.store.search_any_name(&folded, fetch).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(query, error = %e, "place search fallback failed");
                    return Vec::new();
                }
            },
            Err(e) => {
                warn!(query, error = %e, "place search failed");
                return Vec::new();
            }
        };

        let mut candidates = exact;
        candidates.extend(rows);

        debug!(query, candidates = candidates.len(), "ranking place search results");
        rank_places(query, dedup_by_id(candidates), limit)
    }

    /// Look up a place by id, checking the cache first.
    ///
    /// A record fetched from the store is appended to the cached list.
    pub async fn get(&self, id: &PlaceId) -> Result<Option<Place>, PlaceError> {
        if let Some(place) = self.cache.find(id).await {
            return Ok(Some(place));
        }

        let found = self.store.get_by_id(id).await?;
        if let Some(place) = &found {
            self.cache.append(place.clone()).await;
        }
        Ok(found)
    }

    /// The full place list, from cache when fresh.
    pub async fn all(&self) -> Result<Arc<Vec<Place>>, PlaceError> {
        if let Some(places) = self.cache.get().await {
            return Ok(places);
        }
        let places = self.store.list_settlements().await?;
        Ok(self.cache.replace(places).await)
    }

    /// Reload the place list from the store.
    ///
    /// On failure the existing snapshot is kept and the error returned.
    pub async fn refresh(&self) -> Result<usize, PlaceError> {
        let places = self.store.list_settlements().await?;
        let count = places.len();
        self.cache.replace(places).await;
        info!(count, "place list refreshed");
        Ok(count)
    }

    /// Drop the cached place list.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    /// Places within `radius_km` of `center`, nearest first.
    ///
    /// Uses the store's spatial query; if that fails, distances are computed
    /// locally over the full place list. If both fail the result is empty.
    pub async fn nearby(&self, center: Coordinate, radius_km: f64) -> Vec<NearbyPlace> {
        let mut found = match self.store.within_radius(center, radius_km).await {
            Ok(found) => found
                .into_iter()
                .filter(|n| n.distance_km <= radius_km)
                .collect(),
            Err(e) => {
                warn!(%center, radius_km, error = %e, "spatial query failed, scanning place list");
                match self.all().await {
                    Ok(places) => nearby_in(&places, center, radius_km),
                    Err(e) => {
                        warn!(error = %e, "place list unavailable for nearby fallback");
                        return Vec::new();
                    }
                }
            }
        };

        sort_by_distance(&mut found);
        found
    }
}

/// Haversine scan of `places` for those within `radius_km` of `center`.
pub fn nearby_in(places: &[Place], center: Coordinate, radius_km: f64) -> Vec<NearbyPlace> {
    let mut found: Vec<NearbyPlace> = places
        .iter()
        .filter_map(|p| {
            let distance_km = haversine_km(center, p.coord);
            (distance_km <= radius_km).then(|| NearbyPlace {
                place: p.clone(),
                distance_km,
            })
        })
        .collect();
    sort_by_distance(&mut found);
    found
}

fn sort_by_distance(places: &mut [NearbyPlace]) {
    places.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

#[async_trait]
impl PlaceLookup for PlaceDirectory {
    async fn find(&self, id: &PlaceId) -> Option<Place> {
        match self.get(id).await {
            Ok(place) => place,
            Err(e) => {
                warn!(%id, error = %e, "place lookup failed");
                None
            }
        }
    }
}
