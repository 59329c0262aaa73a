//! Route points, validation and primary/fallback leg selection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Coordinate, TripLeg};

use super::error::RoutingError;
use super::fallback::estimate_legs;

/// An unvalidated point as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl RoutePoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            name: None,
        }
    }

    pub fn named(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: Some(name.into()),
        }
    }
}

/// A validated point with its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub coord: Coordinate,
    pub label: String,
}

/// Check a point list before any routing is attempted.
///
/// Requires at least two points. A point at exactly (0, 0) or outside the
/// valid latitude/longitude ranges is rejected. Unnamed points are labelled
/// "Stop N" with N counting from 1.
pub fn validate_points(points: &[RoutePoint]) -> Result<Vec<Waypoint>, RoutingError> {
    if points.len() < 2 {
        return Err(RoutingError::TooFewPoints(points.len()));
    }

    points
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let coord = Coordinate::new(p.lat, p.lng).map_err(|_| RoutingError::InvalidPoint {
                index,
                lat: p.lat,
                lng: p.lng,
                reason: "coordinates out of range",
            })?;
            if coord.is_null_island() {
                return Err(RoutingError::InvalidPoint {
                    index,
                    lat: p.lat,
                    lng: p.lng,
                    reason: "coordinates are (0, 0)",
                });
            }

            let label = p
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Stop {}", index + 1));

            Ok(Waypoint { coord, label })
        })
        .collect()
}

/// The primary (fallible) way of getting driving legs.
#[async_trait]
pub trait LegProvider: Send + Sync {
    /// One leg per consecutive waypoint pair, in order.
    async fn driving_legs(&self, waypoints: &[Waypoint]) -> Result<Vec<TripLeg>, RoutingError>;
}

/// Where a set of legs came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegSource {
    /// Real driving distances from the routing service.
    Routed,
    /// Straight-line estimates computed locally.
    Estimated,
}

/// Legs for a route, tagged with their source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLegs {
    pub legs: Vec<TripLeg>,
    pub source: LegSource,
}

impl RouteLegs {
    pub fn total_km(&self) -> f64 {
        self.legs.iter().map(|l| l.distance_km).sum()
    }

    pub fn total_hours(&self) -> f64 {
        self.legs.iter().map(|l| l.drive_hours).sum()
    }
}

/// Compute legs for `points`, preferring the provider and falling back to
/// straight-line estimates when the provider fails.
///
/// Invalid points are an error on both paths and are reported without
/// contacting the provider.
pub async fn plan_legs<P: LegProvider + ?Sized>(
    provider: &P,
    points: &[RoutePoint],
) -> Result<RouteLegs, RoutingError> {
    let waypoints = validate_points(points)?;

    match provider.driving_legs(&waypoints).await {
        Ok(legs) => Ok(RouteLegs {
            legs,
            source: LegSource::Routed,
        }),
        Err(e) if e.is_invalid_input() => Err(e),
        Err(e) => {
            warn!(error = %e, points = waypoints.len(), "routing failed, using estimated legs");
            Ok(RouteLegs {
                legs: estimate_legs(&waypoints),
                source: LegSource::Estimated,
            })
        }
    }
}
