//! Core library for the `skycast` lookup tool.
//!
//! This crate defines:
//! - Shared domain models (queries, resolved locations, readings)
//! - The lookup error taxonomy
//! - Abstractions over the geocoding and weather collaborators
//! - The request coordinator and the UI state machine
//! - Configuration handling
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod resolver;
pub mod view;

pub use config::Config;
pub use coordinator::RequestCoordinator;
pub use error::{FetchError, LookupError, ResolveError};
pub use model::{FormInput, LocationQuery, QueryTarget, ResolvedLocation, Units, WeatherReading};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use render::{Field, ResultCard};
pub use resolver::{GeoResolver, OpenWeatherGeocoder};
pub use view::{DisplaySurface, SubmitToken, UiState, ViewController};
