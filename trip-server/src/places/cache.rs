//! Time-bounded in-memory cache of the full place list.
//!
//! The cache holds one snapshot (`Arc<Vec<Place>>`) and replaces it
//! wholesale on refresh. Readers get either the old or the new snapshot,
//! never a partially updated one. Single records found after a miss are
//! appended by swapping in a copied snapshot.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::domain::{Place, PlaceId};

/// Default snapshot lifetime: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    places: Arc<Vec<Place>>,
    loaded_at: Instant,
}

/// Cache of the place list with explicit expiry and invalidation.
pub struct PlaceCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    snapshot: RwLock<Option<Snapshot>>,
}

impl PlaceCache {
    /// Create an empty cache using the wall clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create an empty cache with a custom clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            snapshot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, snapshot: &Snapshot) -> bool {
        self.clock.now().saturating_duration_since(snapshot.loaded_at) < self.ttl
    }

    /// The current snapshot, if one is loaded and not expired.
    pub async fn get(&self) -> Option<Arc<Vec<Place>>> {
        let guard = self.snapshot.read().await;
        guard
            .as_ref()
            .filter(|s| self.is_fresh(s))
            .map(|s| s.places.clone())
    }

    /// Replace the snapshot with a freshly loaded list.
    pub async fn replace(&self, places: Vec<Place>) -> Arc<Vec<Place>> {
        let places = Arc::new(places);
        let mut guard = self.snapshot.write().await;
        *guard = Some(Snapshot {
            places: places.clone(),
            loaded_at: self.clock.now(),
        });
        places
    }

    /// Drop the snapshot so the next read reloads.
    pub async fn invalidate(&self) {
        let mut guard = self.snapshot.write().await;
        *guard = None;
    }

    /// Look up a place in the fresh snapshot.
    pub async fn find(&self, id: &PlaceId) -> Option<Place> {
        let places = self.get().await?;
        places.iter().find(|p| &p.id == id).cloned()
    }

    /// Add one record to the loaded snapshot without changing its age.
    ///
    /// Does nothing when no snapshot is loaded or the id is already present.
    pub async fn append(&self, place: Place) {
        let mut guard = self.snapshot.write().await;
        let Some(current) = guard.as_ref() else {
            return;
        };
        if current.places.iter().any(|p| p.id == place.id) {
            return;
        }

        let mut places = Vec::with_capacity(current.places.len() + 1);
        places.extend(current.places.iter().cloned());
        places.push(place);

        *guard = Some(Snapshot {
            places: Arc::new(places),
            loaded_at: current.loaded_at,
        });
    }

    /// Number of places in the snapshot, fresh or not.
    pub async fn len(&self) -> usize {
        let guard = self.snapshot.read().await;
        guard.as_ref().map_or(0, |s| s.places.len())
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn place(id: &str, name: &str) -> Place {
        Place::new(id, name, Coordinate::new(-41.0, 174.0).unwrap())
    }

    fn cache() -> (PlaceCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (PlaceCache::with_clock(DEFAULT_TTL, clock.clone()), clock)
    }

    #[tokio::test]
    async fn empty_cache_misses() {
        let (cache, _) = cache();
        assert!(cache.get().await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn fresh_until_ttl() {
        let (cache, clock) = cache();
        cache.replace(vec![place("1", "Napier")]).await;

        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get().await.unwrap().len(), 1);

        clock.advance(Duration::from_secs(1));
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn replace_swaps_whole_snapshot() {
        let (cache, _) = cache();
        let old = cache.replace(vec![place("1", "Napier")]).await;
        cache
            .replace(vec![place("2", "Hastings"), place("3", "Havelock North")])
            .await;

        // Readers holding the old snapshot still see it intact
        assert_eq!(old.len(), 1);
        assert_eq!(cache.get().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn invalidate_drops_snapshot() {
        let (cache, _) = cache();
        cache.replace(vec![place("1", "Napier")]).await;
        cache.invalidate().await;
        assert!(cache.get().await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn append_keeps_age_and_skips_duplicates() {
        let (cache, clock) = cache();
        cache.replace(vec![place("1", "Napier")]).await;
        clock.advance(Duration::from_secs(200));

        cache.append(place("2", "Taupō")).await;
        cache.append(place("2", "Taupō")).await;
        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.find(&PlaceId::new("2")).await.unwrap().name, "Taupō");

        // Appending doesn't extend the snapshot's life
        clock.advance(Duration::from_secs(100));
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn append_without_snapshot_is_ignored() {
        let (cache, _) = cache();
        cache.append(place("1", "Napier")).await;
        assert!(cache.is_empty().await);
    }
}
