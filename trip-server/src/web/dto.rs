//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::activities::{ActivityQuery, ActivitySummary, DayActivities};
use crate::domain::{Coordinate, Place, TripLeg};
use crate::itinerary::{DayStopMeta, PlanRequest, PlannedTrip};
use crate::places::NearbyPlace;
use crate::routing::{LegSource, RouteLegs, RoutePoint};

/// Default radius for nearby place and activity searches.
pub const DEFAULT_RADIUS_KM: f64 = 25.0;

/// Largest radius a caller may ask for.
pub const MAX_RADIUS_KM: f64 = 500.0;

/// Request to search places by name.
#[derive(Debug, Deserialize)]
pub struct PlaceSearchRequest {
    /// Search query
    #[serde(default)]
    pub q: String,

    /// Maximum results (default 10, max 50)
    pub limit: Option<usize>,
}

/// Response for place search.
#[derive(Debug, Serialize)]
pub struct PlaceSearchResponse {
    pub places: Vec<Place>,
}

/// Request for places around a point.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: Option<f64>,
}

/// Response for nearby places, nearest first.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub places: Vec<NearbyPlace>,
}

/// Request to plan an itinerary.
#[derive(Debug, Deserialize)]
pub struct ItineraryRequest {
    #[serde(flatten)]
    pub plan: PlanRequest,

    /// Also look up activities for each day
    #[serde(default)]
    pub activities: bool,
}

/// Response for itinerary planning.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    #[serde(flatten)]
    pub trip: PlannedTrip,

    /// Which stop each day belongs to
    pub day_meta: Vec<DayStopMeta>,

    /// Driving legs between stops; absent when no route could be built
    pub legs: Option<RouteLegsResponse>,

    /// Per-day activities, when requested and available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<DayActivities>>,
}

/// Request for legs along an explicit list of points.
#[derive(Debug, Deserialize)]
pub struct RouteLegsRequest {
    pub points: Vec<RoutePoint>,
}

/// Legs with route totals.
#[derive(Debug, Serialize)]
pub struct RouteLegsResponse {
    pub legs: Vec<TripLeg>,
    pub source: LegSource,
    pub total_km: f64,
    pub total_hours: f64,
}

impl From<RouteLegs> for RouteLegsResponse {
    fn from(route: RouteLegs) -> Self {
        Self {
            total_km: route.total_km(),
            total_hours: route.total_hours(),
            legs: route.legs,
            source: route.source,
        }
    }
}

/// Request to search activities, either near a point or by text.
#[derive(Debug, Default, Deserialize)]
pub struct ActivitySearchRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_km: Option<f64>,
    pub q: Option<String>,
}

impl ActivitySearchRequest {
    /// Text search wins when `q` is given; otherwise both coordinates are
    /// required.
    pub fn into_query(self) -> Result<ActivityQuery, String> {
        if let Some(q) = self.q.filter(|q| !q.trim().is_empty()) {
            return Ok(ActivityQuery::text(q.trim()));
        }

        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                let center = Coordinate::new(lat, lng).map_err(|e| e.to_string())?;
                let radius_km = checked_radius(self.radius_km)?;
                Ok(ActivityQuery::near(center, radius_km))
            }
            _ => Err("either q or both lat and lng are required".to_string()),
        }
    }
}

/// Apply the default radius and reject out-of-range values.
pub fn checked_radius(radius_km: Option<f64>) -> Result<f64, String> {
    let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
    if !radius_km.is_finite() || radius_km <= 0.0 || radius_km > MAX_RADIUS_KM {
        return Err(format!(
            "radius_km must be greater than 0 and at most {MAX_RADIUS_KM}"
        ));
    }
    Ok(radius_km)
}

/// Response for activity search.
#[derive(Debug, Serialize)]
pub struct ActivitySearchResponse {
    pub provider: String,
    pub activities: Vec<ActivitySummary>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
