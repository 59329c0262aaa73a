//! Third-party activity and event lookups.
//!
//! Providers sit behind [`ActivityProvider`]. The server talks to them
//! through [`CachedActivityClient`], which keeps results for an hour.

mod cache;
mod error;
mod eventfinda;
mod group;
mod provider;
mod types;

pub use cache::{ActivityCacheConfig, CachedActivityClient, cache_key};
pub use error::ActivityError;
pub use eventfinda::{EventfindaClient, EventfindaConfig, parse_events};
pub use group::{DayActivities, group_by_day, location_matches};
pub use provider::{ActivityProvider, validate_query};
pub use types::{ActivityQuery, ActivitySummary};
