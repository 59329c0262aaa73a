//! Trip plan types: days, stops and legs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// One calendar day of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDay {
    /// 1-based day number.
    pub day: u32,
    pub date: NaiveDate,
    pub location: String,
}

/// A generated trip: the route stops, nights per stop and the day sequence.
///
/// Derived from the planning inputs; never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// Stop names in route order (start, waypoints, end).
    pub stops: Vec<String>,

    /// Days assigned to each stop, parallel to `stops`.
    pub nights: Vec<u32>,

    pub days: Vec<TripDay>,
}

impl TripPlan {
    /// Assemble a plan, checking the day sequence invariants.
    ///
    /// Day numbers must run 1, 2, 3... and each date must be exactly one
    /// calendar day after the previous one. The night counts must sum to
    /// the number of days.
    pub fn new(
        stops: Vec<String>,
        nights: Vec<u32>,
        days: Vec<TripDay>,
    ) -> Result<Self, DomainError> {
        if stops.len() != nights.len() {
            return Err(DomainError::NightsMismatch {
                stops: stops.len(),
                nights: nights.len(),
            });
        }

        let total: u32 = nights.iter().sum();
        if total as usize != days.len() {
            return Err(DomainError::DayCountMismatch {
                nights: total,
                days: days.len(),
            });
        }

        for (i, pair) in days.windows(2).enumerate() {
            if pair[0].date.succ_opt() != Some(pair[1].date) {
                return Err(DomainError::NonContiguousDates { index: i + 1 });
            }
        }
        for (i, day) in days.iter().enumerate() {
            if day.day as usize != i + 1 {
                return Err(DomainError::DayNumbering { index: i });
            }
        }

        Ok(Self { stops, nights, days })
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }
}

/// A driven segment between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripLeg {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub drive_hours: f64,
}
