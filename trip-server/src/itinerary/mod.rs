//! Itinerary construction.
//!
//! Turns a start place, an end place, comma-separated waypoints and a date
//! range into a day-by-day trip plan:
//!
//! 1. the route stops are assembled (start, waypoints, end);
//! 2. trip days are allocated across stops ([`allocate_nights`]);
//! 3. each day is tagged with its stop ([`build_day_stop_meta`]);
//! 4. dates are assigned one calendar day apart from the start date.

mod allocate;
mod builder;
mod meta;
mod session;

pub use allocate::allocate_nights;
pub use builder::{MAX_TRIP_DAYS, build_plan, parse_waypoints, route_stops, trip_days};
pub use meta::{DayStopMeta, build_day_stop_meta};
pub use session::{
    ItinerarySession, ItineraryState, PlaceLookup, PlanError, PlanRequest, PlannedTrip, plan_trip,
};
