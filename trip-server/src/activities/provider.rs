use async_trait::async_trait;

use super::error::ActivityError;
use super::types::{ActivityQuery, ActivitySummary};

/// A source of activities and events.
#[async_trait]
pub trait ActivityProvider: Send + Sync {
    /// Short stable name, used in results and cache keys.
    fn name(&self) -> &str;

    async fn search(&self, query: &ActivityQuery) -> Result<Vec<ActivitySummary>, ActivityError>;
}

/// Reject queries no provider could answer.
pub fn validate_query(query: &ActivityQuery) -> Result<(), ActivityError> {
    match query {
        ActivityQuery::Near { radius_km, .. } => {
            if !radius_km.is_finite() || *radius_km <= 0.0 {
                return Err(ActivityError::InvalidQuery(format!(
                    "radius must be positive, got {radius_km}"
                )));
            }
        }
        ActivityQuery::Text { query } => {
            if query.trim().is_empty() {
                return Err(ActivityError::InvalidQuery("empty search text".to_string()));
            }
        }
    }
    Ok(())
}
