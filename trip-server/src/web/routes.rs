//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use futures::future::join_all;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::activities::{
    ActivityError, ActivityQuery, ActivitySummary, DayActivities, group_by_day,
};
use crate::domain::{Coordinate, Place, PlaceId};
use crate::itinerary::{PlanError, PlannedTrip, build_day_stop_meta, plan_trip};
use crate::places::PlaceError;
use crate::routing::{RoutePoint, RoutingError, plan_legs};
use crate::trips::{TripBundle, TripError};

use super::dto::*;
use super::state::AppState;

/// Header carrying the authenticated user id, set by the auth gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Radius used when looking up activities around each stop.
const STOP_ACTIVITY_RADIUS_KM: f64 = 20.0;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/places/search", get(search_places))
        .route("/api/places/nearby", get(nearby_places))
        .route("/api/places/:id", get(get_place))
        .route("/api/itinerary", post(plan_itinerary))
        .route("/api/route/legs", post(route_legs))
        .route("/api/activities", get(search_activities))
        .route("/trips", get(list_trips).post(save_trip))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The caller's user id, if the request is authenticated.
fn user_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Search places by name.
async fn search_places(
    State(state): State<AppState>,
    Query(req): Query<PlaceSearchRequest>,
) -> Json<PlaceSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let places = state.places.search(&req.q, limit).await;
    Json(PlaceSearchResponse { places })
}

/// Places around a point, nearest first.
async fn nearby_places(
    State(state): State<AppState>,
    Query(req): Query<NearbyRequest>,
) -> Result<Json<NearbyResponse>, AppError> {
    let center = Coordinate::new(req.lat, req.lng).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let radius_km =
        checked_radius(req.radius_km).map_err(|message| AppError::BadRequest { message })?;

    let places = state.places.nearby(center, radius_km).await;
    Ok(Json(NearbyResponse { places }))
}

/// Look up one place by id.
async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Place>, AppError> {
    let id = PlaceId::new(id);
    state
        .places
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Place {id} not found"),
        })
}

/// Build a day-by-day plan with driving legs between stops.
async fn plan_itinerary(
    State(state): State<AppState>,
    Json(req): Json<ItineraryRequest>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let trip = plan_trip(&req.plan, state.places.as_ref()).await?;
    let day_meta = build_day_stop_meta(&trip.plan.stops, &trip.plan.nights);

    let points = route_points(&state, &trip).await;
    let legs = match plan_legs(state.routing.as_ref(), &points).await {
        Ok(route) => Some(RouteLegsResponse::from(route)),
        Err(e) => {
            warn!(error = %e, "no legs for itinerary");
            None
        }
    };

    let activities = if req.activities {
        day_activities(&state, &trip, &points).await
    } else {
        None
    };

    Ok(Json(ItineraryResponse {
        trip,
        day_meta,
        legs,
        activities,
    }))
}

/// Coordinates for each stop of a plan.
///
/// Start and end come from the resolved places; waypoints are looked up by
/// name and left out of the route if nothing matches.
async fn route_points(state: &AppState, trip: &PlannedTrip) -> Vec<RoutePoint> {
    let stops = &trip.plan.stops;
    let waypoints = stops
        .get(1..stops.len().saturating_sub(1))
        .unwrap_or_default();

    let resolved = join_all(waypoints.iter().map(|name| async move {
        let found = state.places.search(name, 1).await.into_iter().next();
        (name, found)
    }))
    .await;

    let point = |place: &Place, name: &str| {
        RoutePoint::named(place.coord.lat(), place.coord.lng(), name)
    };

    let mut points = Vec::with_capacity(stops.len());
    points.push(point(&trip.start, &trip.start.name));
    for (name, found) in resolved {
        match found {
            Some(place) => points.push(point(&place, name)),
            None => debug!(waypoint = %name, "waypoint not found, leaving it out of the route"),
        }
    }
    points.push(point(&trip.end, &trip.end.name));
    points
}

/// Activities around each stop, grouped onto the plan's days.
///
/// Returns `None` when activity search isn't configured. Failed lookups
/// for individual stops are skipped.
async fn day_activities(
    state: &AppState,
    trip: &PlannedTrip,
    points: &[RoutePoint],
) -> Option<Vec<DayActivities>> {
    let provider = state.activities.as_ref()?;

    let queries: Vec<ActivityQuery> = points
        .iter()
        .filter_map(|p| Coordinate::new(p.lat, p.lng).ok())
        .map(|center| ActivityQuery::near(center, STOP_ACTIVITY_RADIUS_KM))
        .collect();

    let results = join_all(queries.iter().map(|q| provider.search(q))).await;

    let mut found: Vec<ActivitySummary> = Vec::new();
    for result in results {
        match result {
            Ok(activities) => {
                for activity in activities {
                    let seen = found
                        .iter()
                        .any(|a| a.provider == activity.provider && a.id == activity.id);
                    if !seen {
                        found.push(activity);
                    }
                }
            }
            Err(e) => warn!(error = %e, "activity lookup failed for stop"),
        }
    }

    Some(group_by_day(&trip.plan, &found))
}

/// Legs along an explicit list of points.
async fn route_legs(
    State(state): State<AppState>,
    Json(req): Json<RouteLegsRequest>,
) -> Result<Json<RouteLegsResponse>, AppError> {
    let route = plan_legs(state.routing.as_ref(), &req.points).await?;
    Ok(Json(route.into()))
}

/// Search activities near a point or by text.
async fn search_activities(
    State(state): State<AppState>,
    Query(req): Query<ActivitySearchRequest>,
) -> Result<Json<ActivitySearchResponse>, AppError> {
    let provider = state.activities.as_ref().ok_or_else(|| AppError::Upstream {
        message: "Activity search is not configured".to_string(),
    })?;

    let query = req
        .into_query()
        .map_err(|message| AppError::BadRequest { message })?;
    let activities = provider.search(&query).await?;

    Ok(Json(ActivitySearchResponse {
        provider: provider.name().to_string(),
        activities,
    }))
}

/// The caller's saved trips. Anonymous callers have none.
async fn list_trips(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TripBundle>>, AppError> {
    let Some(user) = user_id(&headers) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(state.trips.list_for_user(&user).await?))
}

/// Save a trip with its days and activities.
///
/// The body is parsed after the auth check so anonymous callers always
/// get 401.
async fn save_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TripBundle>, AppError> {
    let user = user_id(&headers).ok_or(AppError::Unauthorized)?;

    let bundle: TripBundle = serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
        message: format!("Invalid trip: {e}"),
    })?;

    let saved = state.trips.upsert(&user, bundle, Utc::now()).await?;
    Ok(Json(saved))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unauthorized,
    Forbidden { message: String },
    NotFound { message: String },
    /// A backing service failed
    Upstream { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Domain(_) => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<RoutingError> for AppError {
    fn from(e: RoutingError) -> Self {
        if e.is_invalid_input() {
            AppError::BadRequest {
                message: e.to_string(),
            }
        } else {
            AppError::Upstream {
                message: e.to_string(),
            }
        }
    }
}

impl From<PlaceError> for AppError {
    fn from(e: PlaceError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<ActivityError> for AppError {
    fn from(e: ActivityError) -> Self {
        if e.is_invalid_input() {
            AppError::BadRequest {
                message: e.to_string(),
            }
        } else {
            AppError::Upstream {
                message: e.to_string(),
            }
        }
    }
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        match e {
            TripError::Forbidden(_) => AppError::Forbidden {
                message: e.to_string(),
            },
            TripError::Invalid(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            TripError::Storage(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_string(),
            ),
            AppError::Forbidden { message } => (StatusCode::FORBIDDEN, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
