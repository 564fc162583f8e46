//! Pure formatting helpers for the result surface.
//!
//! Everything here is string-in/string-out so the rendering contract can be
//! tested without a display surface.

use crate::model::{ResolvedLocation, Units, WeatherReading};

/// Rendered in place of any absent reading field.
pub const PLACEHOLDER: &str = "N/A";

/// One label/value pair on the result surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// The fully formatted result surface: location fields first, then weather
/// fields, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub location_fields: Vec<Field>,
    pub weather_fields: Vec<Field>,
}

/// Coordinates are always shown with 4 decimal places.
pub fn format_coord(value: f64) -> String {
    format!("{value:.4}")
}

pub fn format_temperature(temp_c: Option<f64>, units: Units) -> String {
    match temp_c {
        None => PLACEHOLDER.to_string(),
        Some(c) => match units {
            Units::Metric => format!("{c:.1}°C"),
            Units::Imperial => format!("{:.1}°F", c * 9.0 / 5.0 + 32.0),
            Units::Standard => format!("{:.1} K", c + 273.15),
        },
    }
}

pub fn format_humidity(humidity_pct: Option<u8>) -> String {
    humidity_pct.map_or_else(|| PLACEHOLDER.to_string(), |h| format!("{h}%"))
}

pub fn format_pressure(pressure_hpa: Option<i32>) -> String {
    pressure_hpa.map_or_else(|| PLACEHOLDER.to_string(), |p| format!("{p} hPa"))
}

pub fn format_wind(wind_speed_mps: Option<f64>, units: Units) -> String {
    match wind_speed_mps {
        None => PLACEHOLDER.to_string(),
        Some(mps) => match units {
            Units::Imperial => format!("{:.1} mph", mps * 2.236_94),
            _ => format!("{mps:.1} m/s"),
        },
    }
}

fn format_description(description: Option<&str>) -> String {
    description
        .filter(|d| !d.is_empty())
        .map_or_else(|| PLACEHOLDER.to_string(), str::to_string)
}

/// Build the result surface for one completed lookup.
///
/// Zip is shown only when present; every weather field falls back to
/// [`PLACEHOLDER`] when absent.
pub fn result_card(
    location: &ResolvedLocation,
    reading: &WeatherReading,
    units: Units,
) -> ResultCard {
    let mut location_fields = vec![
        Field::new("Name", location.name.clone()),
        Field::new("Country", location.country.clone()),
    ];
    if let Some(zip) = &location.zip {
        location_fields.push(Field::new("ZIP", zip.clone()));
    }
    location_fields.push(Field::new("Latitude", format_coord(location.lat)));
    location_fields.push(Field::new("Longitude", format_coord(location.lon)));

    let observed = reading
        .observed_at
        .map_or_else(|| PLACEHOLDER.to_string(), |t| t.format("%Y-%m-%d %H:%M UTC").to_string());

    let weather_fields = vec![
        Field::new("Temperature", format_temperature(reading.temp_c, units)),
        Field::new("Feels like", format_temperature(reading.feels_like_c, units)),
        Field::new("Humidity", format_humidity(reading.humidity_pct)),
        Field::new("Pressure", format_pressure(reading.pressure_hpa)),
        Field::new("Wind", format_wind(reading.wind_speed_mps, units)),
        Field::new("Conditions", format_description(reading.description.as_deref())),
        Field::new("Observed", observed),
    ];

    ResultCard { location_fields, weather_fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mountain_view() -> ResolvedLocation {
        ResolvedLocation {
            name: "Mountain View".to_string(),
            country: "US".to_string(),
            zip: Some("94040".to_string()),
            lat: 37.3861,
            lon: -122.0839,
        }
    }

    fn reading() -> WeatherReading {
        WeatherReading {
            location_name: "Mountain View".to_string(),
            temp_c: Some(18.2),
            feels_like_c: Some(17.5),
            humidity_pct: Some(60),
            pressure_hpa: None,
            wind_speed_mps: Some(3.4),
            description: Some("clear sky".to_string()),
            observed_at: None,
        }
    }

    fn value_of<'a>(fields: &'a [Field], label: &str) -> &'a str {
        fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap_or_else(|| panic!("missing field {label}"))
    }

    #[test]
    fn coords_use_four_decimal_places() {
        assert_eq!(format_coord(37.3861), "37.3861");
        assert_eq!(format_coord(-122.0839), "-122.0839");
        assert_eq!(format_coord(42.5), "42.5000");
    }

    #[test]
    fn humidity_gets_percent_suffix() {
        assert_eq!(format_humidity(Some(60)), "60%");
        assert_eq!(format_humidity(None), "N/A");
    }

    #[test]
    fn missing_pressure_renders_placeholder_in_position() {
        let card = result_card(&mountain_view(), &reading(), Units::Metric);

        assert_eq!(value_of(&card.weather_fields, "Pressure"), "N/A");
        assert_eq!(value_of(&card.weather_fields, "Humidity"), "60%");
        assert_eq!(value_of(&card.weather_fields, "Temperature"), "18.2°C");
    }

    #[test]
    fn zip_is_omitted_when_absent() {
        let mut location = mountain_view();
        location.zip = None;

        let card = result_card(&location, &reading(), Units::Metric);
        assert!(card.location_fields.iter().all(|f| f.label != "ZIP"));
        assert_eq!(value_of(&card.location_fields, "Latitude"), "37.3861");
    }

    #[test]
    fn imperial_units_convert_for_display() {
        assert_eq!(format_temperature(Some(0.0), Units::Imperial), "32.0°F");
        assert_eq!(format_temperature(Some(0.0), Units::Standard), "273.1 K");
        assert_eq!(format_wind(Some(10.0), Units::Imperial), "22.4 mph");
        assert_eq!(format_wind(Some(10.0), Units::Metric), "10.0 m/s");
    }
}
