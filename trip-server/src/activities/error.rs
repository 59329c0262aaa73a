//! Activity provider error types.

/// Errors from third-party activity providers.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unauthorized: check provider credentials")]
    Unauthorized,

    #[error("rate limited by activity provider")]
    RateLimited,

    /// Provider returned an error status
    #[error("activity provider error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Query rejected before reaching the provider
    #[error("invalid activity query: {0}")]
    InvalidQuery(String),

    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ActivityError {
    /// Whether the caller, not the provider, is at fault.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ActivityError::InvalidQuery(_))
    }
}
