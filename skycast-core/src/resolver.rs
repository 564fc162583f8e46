use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::ResolveError,
    model::{LocationQuery, ResolvedLocation},
};

pub mod openweather;

pub use openweather::OpenWeatherGeocoder;

/// Turns a [`LocationQuery`] into coordinates and a display name.
///
/// Implementations must distinguish not-found from transport failures so the
/// coordinator can map them into a useful user message.
#[async_trait]
pub trait GeoResolver: Send + Sync + Debug {
    async fn resolve(&self, query: &LocationQuery) -> Result<ResolvedLocation, ResolveError>;
}
