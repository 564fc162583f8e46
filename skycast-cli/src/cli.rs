use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use tokio::task::JoinError;

use skycast_core::{
    Config, FormInput, LookupError, OpenWeatherGeocoder, OpenWeatherProvider, RequestCoordinator,
    ResolvedLocation, UiState, Units, ViewController, WeatherReading,
};

use crate::surface::TerminalSurface;

const OPENWEATHERMAP_API_KEY: &str = "OPENWEATHERMAP_API_KEY";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup by ZIP code or place name")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and lookup defaults.
    Configure,

    /// Show current weather for a place.
    Show {
        /// Free-text place name, e.g. "Mountain View".
        query: Option<String>,

        /// ZIP or postal code; wins over a free-text query.
        #[arg(long)]
        zip: Option<String>,

        /// Two-letter country code used with --zip.
        #[arg(long)]
        country: Option<String>,

        /// Display units: standard, metric or imperial.
        #[arg(long)]
        units: Option<String>,

        /// OpenWeatherMap API key; overrides config and environment.
        #[arg(long)]
        api_key: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { query, zip, country, units, api_key } => {
                show(query, zip, country, units, api_key).await
            }
        }
    }
}

fn configure() -> Result<ExitCode> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeatherMap API key:").prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let country = Text::new("Default country code for ZIP lookups:")
        .with_default(config.default_country())
        .prompt()?;
    if !country.trim().is_empty() {
        config.default_country = Some(country.trim().to_uppercase());
    }

    let units = Select::new("Display units:", Units::all().to_vec()).prompt()?;
    config.units = Some(units);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(ExitCode::SUCCESS)
}

async fn show(
    query: Option<String>,
    zip: Option<String>,
    country: Option<String>,
    units: Option<String>,
    api_key: Option<String>,
) -> Result<ExitCode> {
    let config = Config::load()?;

    let units = match units {
        Some(s) => Some(Units::try_from(s.as_str())?),
        None => None,
    };

    let form = FormInput { zip, country, free_text: query, units, api_key };
    let units = form.units.unwrap_or_else(|| config.units());

    let mut view = ViewController::new(TerminalSurface::default(), units);
    let token = view.submit();

    match run_lookup(form, &config).await {
        Ok((location, reading)) => view.on_success(token, location, reading),
        Err(e) => view.on_failure(token, &e),
    }

    Ok(if lookup_failed(view.state()) { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

async fn run_lookup(
    form: FormInput,
    config: &Config,
) -> Result<(ResolvedLocation, WeatherReading), LookupError> {
    let lookup_query = form.normalize(config.default_country())?;

    tracing::debug!(target = ?lookup_query.target, "lookup submitted");

    // Key precedence: flag, then environment, then config.
    let api_key = lookup_query
        .api_key
        .clone()
        .or_else(|| {
            std::env::var(OPENWEATHERMAP_API_KEY)
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        })
        .or_else(|| config.api_key.clone());

    let Some(api_key) = api_key else {
        return Err(LookupError::InvalidInput(format!(
            "no API key available. Run `skycast configure` or set {OPENWEATHERMAP_API_KEY}."
        )));
    };

    let coordinator = RequestCoordinator::new(
        Box::new(OpenWeatherGeocoder::new(api_key.clone())),
        Box::new(OpenWeatherProvider::new(api_key)),
    );

    // The lookup runs on a worker task; a panic there surfaces through the
    // error surface instead of tearing down the process.
    let handle = tokio::spawn(async move { coordinator.resolve_and_fetch(&lookup_query).await });
    flatten_join(handle.await)
}

fn flatten_join(
    joined: Result<Result<(ResolvedLocation, WeatherReading), LookupError>, JoinError>,
) -> Result<(ResolvedLocation, WeatherReading), LookupError> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(LookupError::unknown(e)),
    }
}

fn lookup_failed(state: &UiState) -> bool {
    matches!(state, UiState::Error(_))
}
