use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use trip_server::activities::{ActivityError, ActivityProvider, ActivityQuery, ActivitySummary};
use trip_server::domain::{Coordinate, Place, PlaceId, TripLeg, haversine_km};
use trip_server::places::{
    NearbyPlace, PlaceCache, PlaceDirectory, PlaceError, PlaceStore, fold_name,
};
use trip_server::routing::{LegProvider, RoutingError, Waypoint};
use trip_server::trips::MemoryTripStore;
use trip_server::web::{AppState, create_router};

pub fn place(id: &str, name: &str, lat: f64, lng: f64) -> Place {
    Place::new(id, name, Coordinate::new(lat, lng).unwrap())
}

pub fn south_island() -> Vec<Place> {
    vec![
        place("1", "Christchurch", -43.5321, 172.6362).with_rank(380_000),
        place("2", "Lake Tekapo", -44.0046, 170.4771).with_rank(500),
        place("3", "Queenstown", -45.0312, 168.6626).with_rank(16_000),
        place("4", "Queenstown Hill", -45.0250, 168.6700),
    ]
}

/// In-memory place store. The spatial query always fails so nearby
/// searches go through the local scan.
pub struct FakeStore {
    pub places: Vec<Place>,
}

#[async_trait]
impl PlaceStore for FakeStore {
    async fn search_exact_name(&self, name: &str, limit: usize) -> Result<Vec<Place>, PlaceError> {
        Ok(self
            .places
            .iter()
            .filter(|p| fold_name(&p.name) == name)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search_by_name(&self, pattern: &str, limit: usize) -> Result<Vec<Place>, PlaceError> {
        Ok(self
            .places
            .iter()
            .filter(|p| fold_name(&p.name).contains(pattern))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search_any_name(
        &self,
        pattern: &str,
        limit: usize,
    ) -> Result<Vec<Place>, PlaceError> {
        self.search_by_name(pattern, limit).await
    }

    async fn get_by_id(&self, id: &PlaceId) -> Result<Option<Place>, PlaceError> {
        Ok(self.places.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_settlements(&self) -> Result<Vec<Place>, PlaceError> {
        Ok(self.places.clone())
    }

    async fn within_radius(
        &self,
        _center: Coordinate,
        _radius_km: f64,
    ) -> Result<Vec<NearbyPlace>, PlaceError> {
        Err(PlaceError::Api {
            status: 404,
            message: "function places_within_radius does not exist".to_string(),
        })
    }
}

/// Leg provider returning straight-line distances at 60 km/h, or failing.
pub struct FakeRouter {
    pub fail: bool,
}

#[async_trait]
impl LegProvider for FakeRouter {
    async fn driving_legs(&self, waypoints: &[Waypoint]) -> Result<Vec<TripLeg>, RoutingError> {
        if self.fail {
            return Err(RoutingError::RateLimited);
        }
        Ok(waypoints
            .windows(2)
            .map(|pair| {
                let km = haversine_km(pair[0].coord, pair[1].coord);
                TripLeg {
                    from: pair[0].label.clone(),
                    to: pair[1].label.clone(),
                    distance_km: km,
                    drive_hours: km / 60.0,
                }
            })
            .collect())
    }
}

/// Activity provider with one fixed activity per query type.
pub struct FakeActivities;

#[async_trait]
impl ActivityProvider for FakeActivities {
    fn name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &ActivityQuery) -> Result<Vec<ActivitySummary>, ActivityError> {
        let activity = |id: &str, title: &str, location: &str| ActivitySummary {
            id: id.to_string(),
            title: title.to_string(),
            provider: "fake".to_string(),
            kind: Some("Outdoors".to_string()),
            location: location.to_string(),
            starts_at: None,
            url: None,
        };
        Ok(match query {
            ActivityQuery::Text { query } => vec![activity("t1", query, "Queenstown")],
            ActivityQuery::Near { .. } => vec![
                activity("n1", "Skyline Gondola", "Brecon Street, Queenstown"),
                activity("n2", "Dark Sky Tour", "Lake Tekapo"),
            ],
        })
    }
}

pub fn state(routing_fails: bool) -> AppState {
    let directory = PlaceDirectory::new(
        Arc::new(FakeStore {
            places: south_island(),
        }),
        PlaceCache::new(std::time::Duration::from_secs(300)),
    );
    AppState::new(
        directory,
        Arc::new(FakeRouter {
            fail: routing_fails,
        }),
        Arc::new(MemoryTripStore::new()),
    )
}

pub fn app() -> axum::Router {
    create_router(state(false))
}

pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app
        .oneshot(request)
        .await
        .expect("app should handle request");

    let status = resp.status();
    let body = to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("response body should be readable");
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    (status, json)
}

pub async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request build should succeed"),
    )
    .await
}

pub async fn post_json(
    app: axum::Router,
    uri: &str,
    payload: Value,
    user: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    send(
        app,
        builder
            .body(Body::from(payload.to_string()))
            .expect("request build should succeed"),
    )
    .await
}
