//! Trip planner server.
//!
//! Plans road trips across New Zealand: resolves places, spreads the trip's
//! days over its stops, works out driving legs between them and keeps
//! per-day notes, activities and saved trips.

pub mod activities;
pub mod config;
pub mod day_detail;
pub mod domain;
pub mod itinerary;
pub mod places;
pub mod routing;
pub mod trips;
pub mod web;
