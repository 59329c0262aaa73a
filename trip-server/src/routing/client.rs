//! Driving-directions HTTP client.
//!
//! Talks to an OSRM-compatible `route` service. Coordinates go in the path
//! as `lng,lat` pairs separated by semicolons; the response carries one leg
//! per consecutive pair in `routes[0].legs`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::TripLeg;

use super::error::RoutingError;
use super::legs::{LegProvider, Waypoint};
use super::types::RouteResponse;

/// Public OSRM demo server.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base URL of the routing service
    pub base_url: String,
    /// Routing profile, e.g. "driving"
    pub profile: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RoutingConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: "driving".to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted router).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Routing service client.
///
/// Uses a semaphore to limit concurrent requests to the shared public
/// server.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
    semaphore: Arc<Semaphore>,
}

impl RoutingClient {
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// URL for a route request through `waypoints`.
    fn route_url(&self, waypoints: &[Waypoint]) -> String {
        let coords: Vec<String> = waypoints
            .iter()
            .map(|w| format!("{},{}", w.coord.lng(), w.coord.lat()))
            .collect();

        format!(
            "{}/route/v1/{}/{}?overview=false",
            self.base_url,
            self.profile,
            coords.join(";")
        )
    }

    /// Fetch driving legs between consecutive waypoints.
    pub async fn fetch_legs(&self, waypoints: &[Waypoint]) -> Result<Vec<TripLeg>, RoutingError> {
        if waypoints.len() < 2 {
            return Err(RoutingError::TooFewPoints(waypoints.len()));
        }

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RoutingError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = self.route_url(waypoints);
        debug!(%url, "requesting route");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimited);
        }

        // OSRM reports "NoRoute" and friends with a 400 and a JSON body.
        let body = response.text().await?;
        if !status.is_success() && status != reqwest::StatusCode::BAD_REQUEST {
            return Err(RoutingError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        parse_route_response(&body, waypoints)
    }
}

#[async_trait]
impl LegProvider for RoutingClient {
    async fn driving_legs(&self, waypoints: &[Waypoint]) -> Result<Vec<TripLeg>, RoutingError> {
        self.fetch_legs(waypoints).await
    }
}

/// Turn a route response body into legs labelled from `waypoints`.
pub fn parse_route_response(
    body: &str,
    waypoints: &[Waypoint],
) -> Result<Vec<TripLeg>, RoutingError> {
    let response: RouteResponse = serde_json::from_str(body).map_err(|e| RoutingError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })?;

    if response.code != "Ok" {
        return Err(RoutingError::NoRoute {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let legs = response
        .routes
        .and_then(|routes| routes.into_iter().next())
        .and_then(|route| route.legs)
        .ok_or_else(|| RoutingError::NoRoute {
            code: "Ok".to_string(),
            message: "response has no route legs".to_string(),
        })?;

    let expected = waypoints.len().saturating_sub(1);
    if legs.len() != expected {
        return Err(RoutingError::LegCountMismatch {
            expected,
            got: legs.len(),
        });
    }

    Ok(legs
        .iter()
        .zip(waypoints.windows(2))
        .map(|(leg, pair)| TripLeg {
            from: pair[0].label.clone(),
            to: pair[1].label.clone(),
            distance_km: leg.distance / 1000.0,
            drive_hours: leg.duration / 3600.0,
        })
        .collect())
}
