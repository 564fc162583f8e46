use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::ResolveError,
    model::{LocationQuery, QueryTarget, ResolvedLocation},
};

use super::GeoResolver;

const GEOCODING_API_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// Geocoder backed by the OpenWeatherMap Geocoding API.
///
/// ZIP queries use the `/zip` endpoint, free-text queries the `/direct`
/// endpoint with `limit=1`.
#[derive(Debug, Clone)]
pub struct OpenWeatherGeocoder {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherGeocoder {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: GEOCODING_API_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL, e.g. a local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, http: Client::new(), base_url }
    }

    async fn resolve_zip(&self, zip: &str, country: &str) -> Result<ResolvedLocation, ResolveError> {
        let url = format!("{}/zip", self.base_url);
        let zip_param = format!("{zip},{country}");

        tracing::debug!(endpoint = %url, zip = %zip_param, "geocoding zip query");

        let res = self
            .http
            .get(&url)
            .query(&[("zip", zip_param.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ResolveError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ResolveError::Transport(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(ResolveError::NotFound(zip_param));
        }
        if !status.is_success() {
            return Err(ResolveError::Transport(format!(
                "geocoding zip request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: ZipGeoResponse =
            serde_json::from_str(&body).map_err(|e| ResolveError::Malformed(e.to_string()))?;

        Ok(ResolvedLocation {
            name: parsed.name,
            country: parsed.country,
            zip: Some(parsed.zip),
            lat: parsed.lat,
            lon: parsed.lon,
        })
    }

    async fn resolve_free_text(&self, query: &str) -> Result<ResolvedLocation, ResolveError> {
        let url = format!("{}/direct", self.base_url);

        tracing::debug!(endpoint = %url, query, "geocoding free-text query");

        let res = self
            .http
            .get(&url)
            .query(&[("q", query), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ResolveError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ResolveError::Transport(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(ResolveError::NotFound(query.to_string()));
        }
        if !status.is_success() {
            return Err(ResolveError::Transport(format!(
                "geocoding direct request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: Vec<DirectGeoEntry> =
            serde_json::from_str(&body).map_err(|e| ResolveError::Malformed(e.to_string()))?;

        let entry = parsed
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::NotFound(query.to_string()))?;

        let name = match &entry.state {
            Some(state) if !state.is_empty() => format!("{}, {}", entry.name, state),
            _ => entry.name,
        };

        Ok(ResolvedLocation {
            name,
            country: entry.country,
            zip: None,
            lat: entry.lat,
            lon: entry.lon,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ZipGeoResponse {
    zip: String,
    name: String,
    lat: f64,
    lon: f64,
    country: String,
}

#[derive(Debug, Deserialize)]
struct DirectGeoEntry {
    name: String,
    lat: f64,
    lon: f64,
    country: String,
    state: Option<String>,
}

#[async_trait]
impl GeoResolver for OpenWeatherGeocoder {
    async fn resolve(&self, query: &LocationQuery) -> Result<ResolvedLocation, ResolveError> {
        match &query.target {
            QueryTarget::Zip { zip, country } => self.resolve_zip(zip, country).await,
            QueryTarget::FreeText(text) => self.resolve_free_text(text).await,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Back off to a char boundary so multi-byte bodies never split mid-char.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
