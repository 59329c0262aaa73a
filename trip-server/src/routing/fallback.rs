//! Straight-line leg estimates.
//!
//! Always available and free of I/O, so a route can be shown even when the
//! routing service is down.

use crate::domain::{TripLeg, haversine_km};

use super::legs::Waypoint;

/// Road distance is longer than great-circle distance; this is the usual
/// detour factor for rural road networks.
pub const ROAD_FACTOR: f64 = 1.3;

/// Average open-road driving speed in km/h.
pub const AVERAGE_SPEED_KMH: f64 = 70.0;

/// Estimate one leg per consecutive waypoint pair from haversine distance.
pub fn estimate_legs(waypoints: &[Waypoint]) -> Vec<TripLeg> {
    waypoints
        .windows(2)
        .map(|pair| {
            let distance_km = haversine_km(pair[0].coord, pair[1].coord) * ROAD_FACTOR;
            TripLeg {
                from: pair[0].label.clone(),
                to: pair[1].label.clone(),
                distance_km,
                drive_hours: distance_km / AVERAGE_SPEED_KMH,
            }
        })
        .collect()
}
