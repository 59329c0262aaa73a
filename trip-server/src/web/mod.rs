//! Web layer for the trip planner.
//!
//! JSON endpoints for place search, itinerary planning, route legs,
//! activity search and saved trips.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, USER_ID_HEADER, create_router};
pub use state::AppState;
