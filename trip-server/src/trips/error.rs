//! Trip persistence error types.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripError {
    /// The trip exists but belongs to someone else
    #[error("trip {0} belongs to another user")]
    Forbidden(String),

    /// The uploaded bundle is inconsistent
    #[error("invalid trip: {0}")]
    Invalid(String),

    #[error("trip storage error: {0}")]
    Storage(String),
}
