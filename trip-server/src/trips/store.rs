//! Trip repository and its in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::error::TripError;
use super::model::{Trip, TripBundle};

/// Storage for saved trips.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// All trips owned by `user_id`, most recently updated first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TripBundle>, TripError>;

    /// Insert or replace a trip with its days and activities.
    ///
    /// Returns the bundle as stored, with ids and timestamps filled in.
    async fn upsert(
        &self,
        user_id: &str,
        bundle: TripBundle,
        now: DateTime<Utc>,
    ) -> Result<TripBundle, TripError>;
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Fill in ids, ownership and timestamps for a bundle about to be saved.
///
/// `existing` is the stored trip with the same id, if there is one. Its
/// owner must match `user_id` and its `created_at` is kept.
pub fn prepare_bundle(
    user_id: &str,
    mut bundle: TripBundle,
    existing: Option<&Trip>,
    now: DateTime<Utc>,
) -> Result<TripBundle, TripError> {
    if bundle.trip.title.trim().is_empty() {
        return Err(TripError::Invalid("title is empty".to_string()));
    }
    if bundle.trip.end_date < bundle.trip.start_date {
        return Err(TripError::Invalid(format!(
            "end date {} is before start date {}",
            bundle.trip.end_date, bundle.trip.start_date
        )));
    }

    if let Some(existing) = existing
        && existing.user_id != user_id
    {
        return Err(TripError::Forbidden(existing.id.clone()));
    }

    let trip = &mut bundle.trip;
    if trip.id.is_empty() {
        trip.id = new_id();
    }
    trip.user_id = user_id.to_string();
    trip.created_at = existing.and_then(|t| t.created_at).or(Some(now));
    trip.updated_at = Some(now);

    for day in &mut bundle.days {
        if day.id.is_empty() {
            day.id = new_id();
        }
        day.trip_id = trip.id.clone();
    }

    for activity in &mut bundle.activities {
        if activity.id.is_empty() {
            activity.id = new_id();
        }

        let by_id = bundle
            .days
            .iter()
            .find(|d| !activity.day_id.is_empty() && d.id == activity.day_id);
        let by_number = || {
            activity
                .day
                .and_then(|n| bundle.days.iter().find(|d| d.day == n))
        };

        match by_id.or_else(by_number) {
            Some(day) => {
                activity.day_id = day.id.clone();
                activity.day = Some(day.day);
            }
            None => {
                return Err(TripError::Invalid(format!(
                    "activity \"{}\" does not belong to any day of the trip",
                    activity.title
                )));
            }
        }
    }

    Ok(bundle)
}

/// Trips held in process memory.
///
/// Contents are lost on restart; production deployments put a database
/// behind [`TripRepository`].
#[derive(Default)]
pub struct MemoryTripStore {
    trips: RwLock<HashMap<String, TripBundle>>,
}

impl MemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.trips.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TripRepository for MemoryTripStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TripBundle>, TripError> {
        let trips = self.trips.read().await;
        let mut owned: Vec<TripBundle> = trips
            .values()
            .filter(|b| b.trip.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.trip.updated_at.cmp(&a.trip.updated_at));
        Ok(owned)
    }

    async fn upsert(
        &self,
        user_id: &str,
        bundle: TripBundle,
        now: DateTime<Utc>,
    ) -> Result<TripBundle, TripError> {
        let mut trips = self.trips.write().await;

        let existing = trips.get(&bundle.trip.id).map(|b| &b.trip);
        let is_update = existing.is_some();
        let bundle = prepare_bundle(user_id, bundle, existing, now)?;

        info!(
            trip_id = %bundle.trip.id,
            days = bundle.days.len(),
            activities = bundle.activities.len(),
            update = is_update,
            "saved trip"
        );
        trips.insert(bundle.trip.id.clone(), bundle.clone());
        Ok(bundle)
    }
}
