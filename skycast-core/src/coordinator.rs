use crate::{
    error::LookupError,
    model::{LocationQuery, QueryTarget, ResolvedLocation, WeatherReading},
    provider::WeatherProvider,
    resolver::GeoResolver,
};

/// Orchestrates one user-initiated lookup: validate, resolve, fetch.
///
/// Holds no state across invocations; a failure at either step aborts the
/// whole lookup and the caller restarts by resubmitting.
#[derive(Debug)]
pub struct RequestCoordinator {
    resolver: Box<dyn GeoResolver>,
    provider: Box<dyn WeatherProvider>,
}

impl RequestCoordinator {
    pub fn new(resolver: Box<dyn GeoResolver>, provider: Box<dyn WeatherProvider>) -> Self {
        Self { resolver, provider }
    }

    /// Run the full lookup chain for `query`.
    ///
    /// Resolver failures map to [`LookupError::LocationNotFound`], provider
    /// failures to [`LookupError::WeatherUnavailable`]. No retries are
    /// performed. Partial successes are not reported: if resolution succeeds
    /// but the fetch fails, the whole lookup fails.
    pub async fn resolve_and_fetch(
        &self,
        query: &LocationQuery,
    ) -> Result<(ResolvedLocation, WeatherReading), LookupError> {
        validate(query)?;

        let location = self
            .resolver
            .resolve(query)
            .await
            .map_err(|e| LookupError::LocationNotFound(e.to_string()))?;

        tracing::debug!(name = %location.name, lat = location.lat, lon = location.lon, "location resolved");

        let reading = self
            .provider
            .fetch(&location)
            .await
            .map_err(|e| LookupError::WeatherUnavailable(e.to_string()))?;

        tracing::info!(location = %location.name, "lookup completed");

        Ok((location, reading))
    }
}

fn validate(query: &LocationQuery) -> Result<(), LookupError> {
    let populated = match &query.target {
        QueryTarget::Zip { zip, .. } => !zip.trim().is_empty(),
        QueryTarget::FreeText(text) => !text.trim().is_empty(),
    };

    if populated {
        Ok(())
    } else {
        Err(LookupError::InvalidInput("enter a ZIP code or a place name".to_string()))
    }
}
