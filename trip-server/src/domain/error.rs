//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from API/IO errors.

/// Domain-level errors for plan consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Stop list and night counts have different lengths
    #[error("{stops} stops but {nights} night counts")]
    NightsMismatch { stops: usize, nights: usize },

    /// Night counts don't add up to the number of days
    #[error("nights sum to {nights} but plan has {days} days")]
    DayCountMismatch { nights: u32, days: usize },

    /// A day's date doesn't follow the previous day's
    #[error("day at index {index} is not one calendar day after the previous day")]
    NonContiguousDates { index: usize },

    /// Day numbers aren't 1, 2, 3...
    #[error("day at index {index} has the wrong day number")]
    DayNumbering { index: usize },

    /// Date arithmetic left chrono's supported range
    #[error("date out of range")]
    DateOutOfRange,
}
