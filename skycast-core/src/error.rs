use thiserror::Error;

/// Terminal failure reason for one lookup. Every variant is surfaced to the
/// user as a readable message; none are retried automatically.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Location could not be found: {0}")]
    LocationNotFound(String),

    #[error("Weather data is unavailable: {0}")]
    WeatherUnavailable(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl LookupError {
    /// Catch-all wrapper for failures that fit no other category.
    pub fn unknown(detail: impl std::fmt::Display) -> Self {
        LookupError::Unknown(detail.to_string())
    }
}

/// Failure categories a geocoding backend must distinguish.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no match for '{0}'")]
    NotFound(String),

    #[error("geocoding request failed: {0}")]
    Transport(String),

    #[error("geocoding response could not be parsed: {0}")]
    Malformed(String),
}

/// Failure categories a weather backend must distinguish.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("the weather service rejected the API key: {0}")]
    Unauthorized(String),

    #[error("the weather service returned an error: {0}")]
    Service(String),

    #[error("weather response could not be parsed: {0}")]
    Malformed(String),

    #[error("weather request failed: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_readable() {
        let err = LookupError::InvalidInput("enter a ZIP code or a place name".to_string());
        assert_eq!(err.to_string(), "Invalid input: enter a ZIP code or a place name");

        let err = LookupError::LocationNotFound("no match for 'Nonexistentville'".to_string());
        assert!(err.to_string().starts_with("Location could not be found"));

        let err = LookupError::unknown("collaborator panicked");
        assert_eq!(err.to_string(), "Unexpected error: collaborator panicked");
    }
}
