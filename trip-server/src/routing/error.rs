//! Routing error types.

use std::fmt;

/// Errors from the route leg calculator.
///
/// `TooFewPoints` and `InvalidPoint` are input problems and are raised before
/// any request is made. Everything else is a service failure that callers
/// may answer with a straight-line estimate.
#[derive(Debug)]
pub enum RoutingError {
    /// Fewer than two points were supplied
    TooFewPoints(usize),

    /// A point has (0, 0) or out-of-range coordinates
    InvalidPoint {
        index: usize,
        lat: f64,
        lng: f64,
        reason: &'static str,
    },

    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Service returned a non-success status code
    ApiError { status: u16, message: String },

    /// Rate limited by the service
    RateLimited,

    /// Response body wasn't the JSON we expect
    Json {
        message: String,
        body: Option<String>,
    },

    /// Service answered but found no usable route
    NoRoute { code: String, message: String },

    /// Response had a different number of legs than point pairs
    LegCountMismatch { expected: usize, got: usize },
}

impl RoutingError {
    /// True for errors caused by the supplied points rather than the service.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            RoutingError::TooFewPoints(_) | RoutingError::InvalidPoint { .. }
        )
    }
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::TooFewPoints(n) => {
                write!(f, "at least 2 points are required, got {n}")
            }
            RoutingError::InvalidPoint {
                index,
                lat,
                lng,
                reason,
            } => write!(f, "invalid point {index} ({lat}, {lng}): {reason}"),
            RoutingError::Http(e) => write!(f, "HTTP error: {e}"),
            RoutingError::ApiError { status, message } => {
                write!(f, "routing service error {status}: {message}")
            }
            RoutingError::RateLimited => write!(f, "rate limited by routing service"),
            RoutingError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            RoutingError::NoRoute { code, message } => {
                write!(f, "no route found ({code}): {message}")
            }
            RoutingError::LegCountMismatch { expected, got } => {
                write!(f, "expected {expected} legs, routing service returned {got}")
            }
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoutingError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        RoutingError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RoutingError::InvalidPoint {
            index: 1,
            lat: 0.0,
            lng: 0.0,
            reason: "coordinates are (0, 0)",
        };
        assert_eq!(err.to_string(), "invalid point 1 (0, 0): coordinates are (0, 0)");

        let err = RoutingError::ApiError {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "routing service error 503: Service Unavailable");

        let err = RoutingError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("<html>"));

        let err = RoutingError::LegCountMismatch {
            expected: 2,
            got: 1,
        };
        assert_eq!(err.to_string(), "expected 2 legs, routing service returned 1");
    }

    #[test]
    fn input_errors_are_distinguished() {
        assert!(RoutingError::TooFewPoints(1).is_invalid_input());
        assert!(!RoutingError::RateLimited.is_invalid_input());
        assert!(
            !RoutingError::NoRoute {
                code: "NoRoute".into(),
                message: String::new()
            }
            .is_invalid_input()
        );
    }
}
