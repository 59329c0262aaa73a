//! Trip plan construction from a route and a date range.

use chrono::{Days, NaiveDate};

use crate::domain::{DomainError, TripDay, TripPlan};

use super::allocate::allocate_nights;
use super::meta::build_day_stop_meta;

/// Split a comma-separated waypoint field into trimmed, non-empty names.
pub fn parse_waypoints(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Assemble the ordered stop list: start, waypoints, end.
///
/// Waypoints repeating an earlier stop, or naming the end stop, are dropped
/// so each stop appears once. Start and end are always kept, even when equal
/// (a round trip).
pub fn route_stops(start: &str, waypoints: &[String], end: &str) -> Vec<String> {
    let mut stops = vec![start.to_string()];
    for wp in waypoints {
        let seen = stops.iter().any(|s| s.eq_ignore_ascii_case(wp));
        if !seen && !wp.eq_ignore_ascii_case(end) {
            stops.push(wp.clone());
        }
    }
    stops.push(end.to_string());
    stops
}

/// Longest trip, in days, that will be planned.
pub const MAX_TRIP_DAYS: i64 = 366;

/// Number of calendar days in an inclusive date range.
///
/// Returns zero when `end` is before `start`.
pub fn trip_days(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(0)
}

/// Build the day-by-day plan for a route.
///
/// Nights are allocated across `stops`, then days are emitted stop by stop
/// with the date advancing one calendar day per entry from `start_date`.
/// A non-positive `total_days` or empty route yields an empty plan.
pub fn build_plan(
    stops: Vec<String>,
    start_date: NaiveDate,
    total_days: i64,
) -> Result<TripPlan, DomainError> {
    let nights = allocate_nights(stops.len(), total_days);
    if nights.is_empty() {
        return TripPlan::new(Vec::new(), Vec::new(), Vec::new());
    }

    let meta = build_day_stop_meta(&stops, &nights);
    let mut days = Vec::with_capacity(meta.len());

    for (offset, entry) in meta.iter().enumerate() {
        let date = start_date
            .checked_add_days(Days::new(offset as u64))
            .ok_or(DomainError::DateOutOfRange)?;

        days.push(TripDay {
            day: offset as u32 + 1,
            date,
            location: stops[entry.stop_index].clone(),
        });
    }

    TripPlan::new(stops, nights, days)
}
