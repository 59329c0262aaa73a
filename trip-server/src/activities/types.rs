//! Provider-neutral activity types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

/// What to search a provider for.
///
/// Serialized form is part of the cache key, so field order matters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActivityQuery {
    /// Activities within `radius_km` of a point
    Near { center: Coordinate, radius_km: f64 },
    /// Free-text search
    Text { query: String },
}

impl ActivityQuery {
    pub fn near(center: Coordinate, radius_km: f64) -> Self {
        ActivityQuery::Near { center, radius_km }
    }

    pub fn text(query: impl Into<String>) -> Self {
        ActivityQuery::Text {
            query: query.into(),
        }
    }
}

/// A single activity or event, whatever provider it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub id: String,
    pub title: String,
    /// Provider name, e.g. "eventfinda"
    pub provider: String,
    /// Category, e.g. "Concerts & Gig Guide"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable location, e.g. "Queenstown Gardens, Queenstown"
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
