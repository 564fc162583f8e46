use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Unit system for display formatting. The weather backend is always queried
/// in metric; the preference only affects how readings are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Standard,
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Standard, Units::Metric, Units::Imperial]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: standard, metric, imperial."
            )),
        }
    }
}

/// The two query modes a submission can carry. Exactly one is populated by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    Zip { zip: String, country: String },
    FreeText(String),
}

/// A validated location lookup request. Created on form submission and
/// discarded after the lookup completes; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub target: QueryTarget,
    pub api_key: Option<String>,
}

impl LocationQuery {
    pub fn zip(zip: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            target: QueryTarget::Zip { zip: zip.into(), country: country.into() },
            api_key: None,
        }
    }

    pub fn free_text(query: impl Into<String>) -> Self {
        Self { target: QueryTarget::FreeText(query.into()), api_key: None }
    }
}

/// Raw submission payload as it arrives from the form surface. Every field is
/// optional; `normalize` turns it into a canonical [`LocationQuery`].
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub zip: Option<String>,
    pub country: Option<String>,
    pub free_text: Option<String>,
    pub units: Option<Units>,
    pub api_key: Option<String>,
}

impl FormInput {
    /// Normalize the raw payload into a [`LocationQuery`].
    ///
    /// A non-blank zip wins over free text when both are present. A zip
    /// without a country uses `default_country`. Fails with
    /// [`LookupError::InvalidInput`] when neither mode is populated; the
    /// network is never reached in that case.
    pub fn normalize(self, default_country: &str) -> Result<LocationQuery, LookupError> {
        let zip = non_blank(self.zip);
        let free_text = non_blank(self.free_text);

        let target = match (zip, free_text) {
            (Some(zip), _) => {
                let country =
                    non_blank(self.country).unwrap_or_else(|| default_country.to_string());
                QueryTarget::Zip { zip, country }
            }
            (None, Some(query)) => QueryTarget::FreeText(query),
            (None, None) => {
                return Err(LookupError::InvalidInput(
                    "enter a ZIP code or a place name".to_string(),
                ));
            }
        };

        Ok(LocationQuery { target, api_key: non_blank(self.api_key) })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Geographic coordinates and display name derived from a [`LocationQuery`].
/// Immutable once returned by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub name: String,
    pub country: String,
    pub zip: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Normalized current-conditions data. Fields are optional-safe: any missing
/// field renders as a placeholder rather than failing the whole render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location_name: String,
    pub temp_c: Option<f64>,
    pub feels_like_c: Option<f64>,
    pub humidity_pct: Option<u8>,
    pub pressure_hpa: Option<i32>,
    pub wind_speed_mps: Option<f64>,
    pub description: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_prefers_zip_over_free_text() {
        let input = FormInput {
            zip: Some("94040".into()),
            country: Some("US".into()),
            free_text: Some("Mountain View".into()),
            ..Default::default()
        };

        let query = input.normalize("CA").expect("zip mode must normalize");
        assert_eq!(
            query.target,
            QueryTarget::Zip { zip: "94040".into(), country: "US".into() }
        );
    }

    #[test]
    fn normalize_defaults_country_for_zip() {
        let input = FormInput { zip: Some("N7L".into()), ..Default::default() };

        let query = input.normalize("CA").expect("zip mode must normalize");
        assert_eq!(query.target, QueryTarget::Zip { zip: "N7L".into(), country: "CA".into() });
    }

    #[test]
    fn normalize_trims_free_text() {
        let input = FormInput { free_text: Some("  Mountain View  ".into()), ..Default::default() };

        let query = input.normalize("US").expect("free text must normalize");
        assert_eq!(query.target, QueryTarget::FreeText("Mountain View".into()));
    }

    #[test]
    fn normalize_rejects_empty_submission() {
        let input = FormInput {
            zip: Some("   ".into()),
            free_text: Some(String::new()),
            ..Default::default()
        };

        let err = input.normalize("US").unwrap_err();
        assert!(matches!(err, LookupError::InvalidInput(_)));
    }

    #[test]
    fn normalize_drops_blank_api_key() {
        let input = FormInput {
            free_text: Some("Chatham".into()),
            api_key: Some("  ".into()),
            ..Default::default()
        };

        let query = input.normalize("US").expect("free text must normalize");
        assert_eq!(query.api_key, None);
    }

    #[test]
    fn units_roundtrip() {
        for units in Units::all() {
            let parsed = Units::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn unknown_units_error() {
        let err = Units::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown units"));
    }
}
