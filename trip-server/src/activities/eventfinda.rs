//! Eventfinda REST client.
//!
//! Eventfinda uses HTTP basic auth with an API username and password.
//! Results are mapped to [`ActivitySummary`] so the rest of the server
//! never sees the upstream shape.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDateTime;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::debug;

use super::error::ActivityError;
use super::provider::{ActivityProvider, validate_query};
use super::types::{ActivityQuery, ActivitySummary};

const DEFAULT_BASE_URL: &str = "https://api.eventfinda.co.nz";

const PROVIDER_NAME: &str = "eventfinda";

/// Upstream timestamp format, e.g. "2025-01-03 19:30:00".
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<EventDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub datetime_start: Option<String>,
    #[serde(default)]
    pub location_summary: Option<String>,
    #[serde(default)]
    pub location: Option<LocationDto>,
    #[serde(default)]
    pub category: Option<CategoryDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDto {
    pub name: String,
}

impl EventDto {
    fn into_summary(self) -> ActivitySummary {
        let location = self
            .location_summary
            .filter(|s| !s.is_empty())
            .or_else(|| self.location.as_ref().and_then(|l| l.summary.clone()))
            .or_else(|| self.location.as_ref().and_then(|l| l.name.clone()))
            .unwrap_or_default();

        let starts_at = self
            .datetime_start
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).ok());

        ActivitySummary {
            id: self.id.to_string(),
            title: self.name,
            provider: PROVIDER_NAME.to_string(),
            kind: self.category.map(|c| c.name),
            location,
            starts_at,
            url: self.url,
        }
    }
}

/// Configuration for the Eventfinda client.
#[derive(Debug, Clone)]
pub struct EventfindaConfig {
    pub username: String,
    pub password: String,
    pub base_url: String,
    /// Maximum results per request
    pub rows: u32,
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl EventfindaConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            rows: 20,
            max_concurrent: 4,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Clone)]
pub struct EventfindaClient {
    http: reqwest::Client,
    base_url: String,
    rows: u32,
    semaphore: Arc<Semaphore>,
}

impl EventfindaClient {
    pub fn new(config: EventfindaConfig) -> Result<Self, ActivityError> {
        if config.username.is_empty() {
            return Err(ActivityError::NotConfigured(
                "Eventfinda username is empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            basic_auth(&config.username, &config.password)?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rows: config.rows,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    fn query_params(&self, query: &ActivityQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![("rows", self.rows.to_string())];
        match query {
            ActivityQuery::Near { center, radius_km } => {
                params.push(("point", format!("{},{}", center.lat(), center.lng())));
                params.push(("radius", format!("{}", radius_km.ceil() as u64)));
            }
            ActivityQuery::Text { query } => {
                params.push(("q", query.trim().to_string()));
            }
        }
        params
    }
}

fn basic_auth(username: &str, password: &str) -> Result<HeaderValue, ActivityError> {
    let token = STANDARD.encode(format!("{username}:{password}"));
    HeaderValue::from_str(&format!("Basic {token}"))
        .map_err(|_| ActivityError::NotConfigured("invalid credentials format".to_string()))
}

/// Parse an events response body.
pub fn parse_events(body: &str) -> Result<Vec<ActivitySummary>, ActivityError> {
    let response: EventsResponse = serde_json::from_str(body).map_err(|e| ActivityError::Json {
        message: e.to_string(),
    })?;
    Ok(response
        .events
        .into_iter()
        .map(EventDto::into_summary)
        .collect())
}

#[async_trait]
impl ActivityProvider for EventfindaClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn search(&self, query: &ActivityQuery) -> Result<Vec<ActivitySummary>, ActivityError> {
        validate_query(query)?;

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ActivityError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/v2/events.json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ActivityError::Unauthorized);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ActivityError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ActivityError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        let events = parse_events(&body)?;
        debug!(count = events.len(), "eventfinda search");
        Ok(events)
    }
}
