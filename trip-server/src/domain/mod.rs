//! Domain types for the trip planner.
//!
//! This module contains the core domain model types, from coordinates and
//! places up to generated trip plans. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod coord;
mod error;
mod place;
mod trip;

pub use coord::{Coordinate, EARTH_RADIUS_KM, InvalidCoordinate, haversine_km};
pub use error::DomainError;
pub use place::{Place, PlaceId, PlaceKind};
pub use trip::{TripDay, TripLeg, TripPlan};
