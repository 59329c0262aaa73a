//! PostgREST client for the hosted Postgres/PostGIS place table.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::warn;

use crate::domain::{Coordinate, Place, PlaceId, PlaceKind, haversine_km};

use super::error::PlaceError;
use super::normalize::sanitize_pattern;
use super::store::{NearbyPlace, PlaceStore};

/// Columns fetched for every place query.
const PLACE_COLUMNS: &str = "id,name,display_name,lat,lng,population,place_type";

/// Spatial lookup function exposed by the database.
const NEARBY_RPC: &str = "places_within_radius";

/// Place ids are integers in some imports and text in others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl RowId {
    fn into_string(self) -> String {
        match self {
            RowId::Int(n) => n.to_string(),
            RowId::Text(s) => s,
        }
    }
}

/// One row of the `places` table (or the nearby RPC result).
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceRow {
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub place_type: Option<String>,
    /// Only present in nearby RPC results.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl PlaceRow {
    /// Convert to a domain place, rejecting rows with invalid coordinates.
    pub fn into_place(self) -> Option<Place> {
        let coord = match Coordinate::new(self.lat, self.lng) {
            Ok(c) => c,
            Err(e) => {
                warn!(id = ?self.id, error = %e, "skipping place row");
                return None;
            }
        };

        let kind = self.place_type.as_deref().and_then(|t| {
            PlaceKind::SETTLEMENTS
                .into_iter()
                .find(|k| k.as_str().eq_ignore_ascii_case(t))
        });

        Some(Place {
            id: PlaceId::new(self.id.into_string()),
            name: self.name,
            display_name: self.display_name.filter(|d| !d.is_empty()),
            coord,
            rank: self.population,
            kind,
        })
    }
}

/// Configuration for the place store client.
#[derive(Debug, Clone)]
pub struct PlaceStoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Anonymous API key, sent as `apikey` and bearer token
    pub api_key: String,
    /// Table holding place rows
    pub table: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlaceStoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: "places".to_string(),
            timeout_secs: 10,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP client for the place store.
#[derive(Debug, Clone)]
pub struct PlaceStoreClient {
    http: reqwest::Client,
    base_url: String,
    table: String,
}

impl PlaceStoreClient {
    pub fn new(config: PlaceStoreConfig) -> Result<Self, PlaceError> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| PlaceError::Config("invalid API key format".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| PlaceError::Config("invalid API key format".to_string()))?;
        headers.insert(HeaderName::from_static("apikey"), key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            table: config.table,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    /// Run a filtered select against the place table.
    async fn select(&self, filters: &[(&str, String)]) -> Result<Vec<Place>, PlaceError> {
        let response = self
            .http
            .get(self.table_url())
            .query(&[("select", PLACE_COLUMNS)])
            .query(filters)
            .send()
            .await?;

        let rows: Vec<PlaceRow> = read_json(response).await?;
        Ok(rows.into_iter().filter_map(PlaceRow::into_place).collect())
    }
}

/// Check the status and decode a JSON body.
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, PlaceError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(PlaceError::Unauthorized);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PlaceError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| PlaceError::Json {
        message: e.to_string(),
    })
}

/// `ilike` filter value matching `pattern` anywhere.
fn contains(pattern: &str) -> String {
    format!("ilike.*{}*", sanitize_pattern(pattern))
}

/// `eq` filter value matching `name` exactly.
fn equals(name: &str) -> String {
    format!("eq.{name}")
}

#[async_trait]
impl PlaceStore for PlaceStoreClient {
    async fn search_exact_name(&self, name: &str, limit: usize) -> Result<Vec<Place>, PlaceError> {
        self.select(&[
            ("normalized_name", equals(name)),
            ("order", "population.desc.nullslast".to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }

    async fn search_by_name(&self, pattern: &str, limit: usize) -> Result<Vec<Place>, PlaceError> {
        self.select(&[
            ("normalized_name", contains(pattern)),
            ("order", "population.desc.nullslast".to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }

    async fn search_any_name(
        &self,
        pattern: &str,
        limit: usize,
    ) -> Result<Vec<Place>, PlaceError> {
        let p = sanitize_pattern(pattern);
        self.select(&[
            (
                "or",
                format!("(display_name.ilike.*{p}*,normalized_name.ilike.*{p}*)"),
            ),
            ("order", "population.desc.nullslast".to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }

    async fn get_by_id(&self, id: &PlaceId) -> Result<Option<Place>, PlaceError> {
        let mut places = self
            .select(&[
                ("id", format!("eq.{}", id.as_str())),
                ("limit", "1".to_string()),
            ])
            .await?;
        Ok(places.pop())
    }

    async fn list_settlements(&self) -> Result<Vec<Place>, PlaceError> {
        let kinds: Vec<&str> = PlaceKind::SETTLEMENTS.iter().map(|k| k.as_str()).collect();
        self.select(&[("place_type", format!("in.({})", kinds.join(",")))])
            .await
    }

    async fn within_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<NearbyPlace>, PlaceError> {
        let response = self
            .http
            .post(self.rpc_url(NEARBY_RPC))
            .json(&serde_json::json!({
                "lat": center.lat(),
                "lng": center.lng(),
                "radius_km": radius_km,
            }))
            .send()
            .await?;

        let rows: Vec<PlaceRow> = read_json(response).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let reported = row.distance_km;
                let place = row.into_place()?;
                let distance_km = reported.unwrap_or_else(|| haversine_km(center, place.coord));
                Some(NearbyPlace { place, distance_km })
            })
            .collect())
    }
}
