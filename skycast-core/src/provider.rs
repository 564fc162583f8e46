use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::FetchError,
    model::{ResolvedLocation, WeatherReading},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Fetches current conditions for resolved coordinates.
///
/// Implementations must distinguish unauthorized, service and malformed
/// failures so the coordinator can produce a useful user message.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, location: &ResolvedLocation) -> Result<WeatherReading, FetchError>;
}
