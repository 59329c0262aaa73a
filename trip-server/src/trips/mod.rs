//! Saved trips.
//!
//! Signed-in users save a trip together with its days and activities in
//! one upload. Storage sits behind [`TripRepository`].

mod error;
mod model;
mod store;

pub use error::TripError;
pub use model::{Activity, Booking, Trip, TripBundle, TripDayRecord};
pub use store::{MemoryTripStore, TripRepository, prepare_bundle};
