//! Place store error types.

/// Errors that can occur when talking to the place store.
#[derive(Debug, thiserror::Error)]
pub enum PlaceError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check PLACE_STORE_KEY")]
    Unauthorized,

    /// Store returned an error status
    #[error("place store error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Client could not be configured
    #[error("invalid place store configuration: {0}")]
    Config(String),
}
