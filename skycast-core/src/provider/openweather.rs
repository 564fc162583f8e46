use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{ResolvedLocation, WeatherReading},
};

use super::WeatherProvider;

const WEATHER_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Current-conditions provider backed by the OpenWeatherMap Current Weather
/// API. Always queries in metric; unit conversion happens at render time.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: WEATHER_API_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL, e.g. a local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, http: Client::new(), base_url }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<u8>,
    pressure: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    dt: Option<i64>,
    main: Option<OwMain>,
    weather: Option<Vec<OwWeather>>,
    wind: Option<OwWind>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, location: &ResolvedLocation) -> Result<WeatherReading, FetchError> {
        let url = format!("{}/weather", self.base_url);

        tracing::debug!(endpoint = %url, lat = location.lat, lon = location.lon, "weather query");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", location.lat.to_string()),
                ("lon", location.lon.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized(truncate_body(&body)));
        }
        if !status.is_success() {
            return Err(FetchError::Service(format!(
                "weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let main = parsed.main;
        let description = parsed
            .weather
            .and_then(|w| w.into_iter().next())
            .and_then(|w| w.description);

        Ok(WeatherReading {
            location_name: parsed.name.unwrap_or_else(|| location.name.clone()),
            temp_c: main.as_ref().and_then(|m| m.temp),
            feels_like_c: main.as_ref().and_then(|m| m.feels_like),
            humidity_pct: main.as_ref().and_then(|m| m.humidity),
            pressure_hpa: main.as_ref().and_then(|m| m.pressure),
            wind_speed_mps: parsed.wind.and_then(|w| w.speed),
            description,
            observed_at: parsed.dt.and_then(unix_to_utc),
        })
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
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
