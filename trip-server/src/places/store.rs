//! The query surface of the backing place store.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Coordinate, Place, PlaceId};

use super::error::PlaceError;

/// A place with its distance from a query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPlace {
    #[serde(flatten)]
    pub place: Place,
    pub distance_km: f64,
}

/// Remote spatial store of place records.
///
/// Implemented over HTTP by [`super::PlaceStoreClient`]; tests use
/// in-memory fakes.
#[async_trait]
pub trait PlaceStore: Send + Sync {
    /// Places whose normalized name contains `pattern` (already folded).
    async fn search_by_name(&self, pattern: &str, limit: usize) -> Result<Vec<Place>, PlaceError>;

    /// Places whose normalized name equals `name` (already folded).
    async fn search_exact_name(&self, name: &str, limit: usize) -> Result<Vec<Place>, PlaceError>;

    /// Places whose display name or normalized name contains `pattern`.
    async fn search_any_name(&self, pattern: &str, limit: usize)
    -> Result<Vec<Place>, PlaceError>;

    async fn get_by_id(&self, id: &PlaceId) -> Result<Option<Place>, PlaceError>;

    /// All cities, towns, villages and hamlets.
    async fn list_settlements(&self) -> Result<Vec<Place>, PlaceError>;

    /// Places within `radius_km` of `center`, using the store's spatial index.
    async fn within_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<NearbyPlace>, PlaceError>;
}
