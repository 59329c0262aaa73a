//! Saved trip records.
//!
//! A [`TripBundle`] is both the upload shape and what listing returns: the
//! trip row plus its days and activities. Ids may be missing on upload and
//! are assigned on save.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub id: String,
    /// Owner; always overwritten with the caller on save
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Stop names in route order
    #[serde(default)]
    pub stops: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDayRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub trip_id: String,
    /// 1-based day number
    pub day: u32,
    pub date: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub accommodation: String,
}

/// Booking details attached to an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    /// Id of the day this belongs to. May be empty on upload when `day` is
    /// given instead.
    #[serde(default)]
    pub day_id: String,
    /// Day number, used to find the day when `day_id` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    /// e.g. "event", "tour", "dining"
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripBundle {
    pub trip: Trip,
    #[serde(default)]
    pub days: Vec<TripDayRecord>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}
