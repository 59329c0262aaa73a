//! Route leg calculation.
//!
//! Real driving distances come from an OSRM-compatible routing service.
//! When that fails, legs are estimated from great-circle distance so a
//! route can always be shown. Key points:
//!
//! - Points are validated before any request; (0, 0) and out-of-range
//!   coordinates are input errors, not network failures
//! - [`plan_legs`] picks the source and reports it as [`LegSource`]

mod client;
mod error;
mod fallback;
mod legs;
mod types;

pub use client::{RoutingClient, RoutingConfig, parse_route_response};
pub use error::RoutingError;
pub use fallback::{AVERAGE_SPEED_KMH, ROAD_FACTOR, estimate_legs};
pub use legs::{LegProvider, LegSource, RouteLegs, RoutePoint, Waypoint, plan_legs, validate_points};
