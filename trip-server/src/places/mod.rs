//! Place directory backed by a remote spatial store.
//!
//! Resolves place names to coordinates for search boxes and itinerary
//! anchors. The store is a hosted Postgres/PostGIS database reached through
//! its PostgREST API; the full settlement list is cached in memory for
//! lookups and as the fallback for nearby queries.

mod cache;
mod client;
mod directory;
mod error;
mod normalize;
mod rank;
mod store;

pub use cache::{Clock, DEFAULT_TTL, ManualClock, PlaceCache, SystemClock};
pub use client::{PlaceRow, PlaceStoreClient, PlaceStoreConfig};
pub use directory::{PlaceDirectory, nearby_in};
pub use error::PlaceError;
pub use normalize::{fold_name, sanitize_pattern};
pub use rank::rank_places;
pub use store::{NearbyPlace, PlaceStore};
