//! Server configuration from environment variables.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

use crate::routing::RoutingConfig;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_ROUTING_URL: &str = "https://router.project-osrm.org";
const DEFAULT_PLACE_CACHE_TTL_SECS: &str = "300";
const DEFAULT_ACTIVITY_CACHE_TTL_SECS: &str = "3600";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Eventfinda API credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventfindaCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub place_store_url: String,
    pub place_store_key: String,
    pub routing_url: String,
    /// Activity search is disabled without these
    pub eventfinda: Option<EventfindaCredentials>,
    pub place_cache_ttl: Duration,
    pub activity_cache_ttl: Duration,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to read variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let eventfinda = match (var("EVENTFINDA_USERNAME"), var("EVENTFINDA_PASSWORD")) {
            (Some(username), Some(password)) => Some(EventfindaCredentials { username, password }),
            _ => {
                warn!("EVENTFINDA_USERNAME/EVENTFINDA_PASSWORD not set, activity search disabled");
                None
            }
        };

        Ok(Self {
            addr: parse_or(&var, "TRIP_SERVER_ADDR", DEFAULT_ADDR)?,
            place_store_url: var("PLACE_STORE_URL").ok_or(ConfigError::Missing("PLACE_STORE_URL"))?,
            place_store_key: var("PLACE_STORE_KEY").ok_or(ConfigError::Missing("PLACE_STORE_KEY"))?,
            routing_url: parse_or(&var, "ROUTING_URL", DEFAULT_ROUTING_URL)?,
            eventfinda,
            place_cache_ttl: parse_ttl(
                &var,
                "PLACE_CACHE_TTL_SECS",
                DEFAULT_PLACE_CACHE_TTL_SECS,
            )?,
            activity_cache_ttl: parse_ttl(
                &var,
                "ACTIVITY_CACHE_TTL_SECS",
                DEFAULT_ACTIVITY_CACHE_TTL_SECS,
            )?,
        })
    }

    pub fn routing(&self) -> RoutingConfig {
        RoutingConfig::default().with_base_url(&self.routing_url)
    }
}

fn parse_or<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })
}

/// A cache lifetime in whole seconds; must be non-zero.
fn parse_ttl(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<Duration, ConfigError> {
    match parse_or::<u64>(var, key, default)? {
        0 => Err(ConfigError::Invalid {
            key,
            message: "must be at least 1 second".to_string(),
        }),
        secs => Ok(Duration::from_secs(secs)),
    }
}
