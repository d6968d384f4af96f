//! `zipcode-weather` - current temperature for a postal code
//!
//! Resolves a postal code to its city through a geocoding service, then
//! asks a weather service for that city's current temperature and reports
//! it in Celsius, Fahrenheit and Kelvin over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::AppConfig;
pub use error::{ApiError, LookupError, ZipWeatherError};
pub use location_resolver::{LocationLookup, LocationResolver};
pub use models::{Location, Temperature};
pub use weather::{TemperatureLookup, TemperatureResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ZipWeatherError>;

/// Build the production state from configuration
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    Ok(AppState::new(
        LocationResolver::new(&config.geocoding)?,
        TemperatureResolver::new(&config.weather)?,
    ))
}
