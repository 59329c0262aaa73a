//! Itinerary submission state machine.
//!
//! A session starts `Idle`. Submitting a request validates the start and end
//! places and moves to either `PlanReady` or `Failed`. The transient
//! "submitted" state is the in-flight [`ItinerarySession::submit`] call.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{DomainError, Place, PlaceId, TripPlan};

use super::builder::{MAX_TRIP_DAYS, build_plan, parse_waypoints, route_stops, trip_days};

/// Resolves place identifiers to known places.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    async fn find(&self, id: &PlaceId) -> Option<Place>;
}

/// A user's trip-planning form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub start_id: Option<PlaceId>,

    #[serde(default)]
    pub end_id: Option<PlaceId>,

    /// Comma-separated waypoint names.
    #[serde(default)]
    pub waypoints: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,
}

/// Validation failures shown to the user as a form-level message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("Please select a valid start city")]
    InvalidStart,

    #[error("Please select a valid end city")]
    InvalidEnd,

    #[error("End date must be on or after the start date")]
    InvalidDateRange,

    #[error("Trips can be at most {} days long", MAX_TRIP_DAYS)]
    TooLong,

    #[error("could not build plan: {0}")]
    Domain(#[from] DomainError),
}

/// A validated plan with its resolved endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedTrip {
    pub start: Place,
    pub end: Place,
    pub waypoints: Vec<String>,
    pub plan: TripPlan,
}

/// Where a session currently is.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ItineraryState {
    #[default]
    Idle,
    PlanReady(Box<PlannedTrip>),
    Failed(String),
}

/// Resolve and build a plan without touching any session state.
pub async fn plan_trip<L: PlaceLookup + ?Sized>(
    request: &PlanRequest,
    lookup: &L,
) -> Result<PlannedTrip, PlanError> {
    let start = match &request.start_id {
        Some(id) => lookup.find(id).await,
        None => None,
    }
    .ok_or(PlanError::InvalidStart)?;

    let end = match &request.end_id {
        Some(id) => lookup.find(id).await,
        None => None,
    }
    .ok_or(PlanError::InvalidEnd)?;

    let total_days = trip_days(request.start_date, request.end_date);
    if total_days <= 0 {
        return Err(PlanError::InvalidDateRange);
    }
    if total_days > MAX_TRIP_DAYS {
        return Err(PlanError::TooLong);
    }

    let waypoints = parse_waypoints(&request.waypoints);
    let stops = route_stops(&start.name, &waypoints, &end.name);
    debug!(
        start = %start.name,
        end = %end.name,
        stops = stops.len(),
        total_days,
        "building trip plan"
    );
    let plan = build_plan(stops, request.start_date, total_days)?;

    Ok(PlannedTrip {
        start,
        end,
        waypoints,
        plan,
    })
}

/// Explicit state holder for one planning form.
#[derive(Debug, Default)]
pub struct ItinerarySession {
    state: ItineraryState,
}

impl ItinerarySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ItineraryState {
        &self.state
    }

    /// The current plan, if the last submission succeeded.
    pub fn plan(&self) -> Option<&PlannedTrip> {
        match &self.state {
            ItineraryState::PlanReady(trip) => Some(trip),
            _ => None,
        }
    }

    /// Validate and build a plan, replacing the current state.
    pub async fn submit<L: PlaceLookup + ?Sized>(
        &mut self,
        request: &PlanRequest,
        lookup: &L,
    ) -> &ItineraryState {
        self.state = match plan_trip(request, lookup).await {
            Ok(trip) => ItineraryState::PlanReady(Box::new(trip)),
            Err(e) => ItineraryState::Failed(e.to_string()),
        };
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = ItineraryState::Idle;
    }
}
