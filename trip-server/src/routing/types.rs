//! Routing service response DTOs.
//!
//! These map the OSRM `route` service JSON. Fields we don't use are
//! ignored; everything we do use is optional because error responses omit
//! `routes` entirely.

use serde::Deserialize;

/// Top-level `route` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// "Ok" on success, otherwise an error code such as "NoRoute".
    pub code: String,

    /// Human-readable error detail, present on failures.
    pub message: Option<String>,

    pub routes: Option<Vec<Route>>,
}

/// One candidate route through all requested coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// Total distance in metres.
    pub distance: Option<f64>,

    /// Total duration in seconds.
    pub duration: Option<f64>,

    /// One leg per consecutive coordinate pair.
    pub legs: Option<Vec<RouteLeg>>,
}

/// A leg between two consecutive coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteLeg {
    /// Metres.
    pub distance: f64,

    /// Seconds.
    pub duration: f64,
}
