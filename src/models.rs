//! Data models for resolved locations and temperature readings
//!
//! Both records live for a single request: the location is produced by the
//! geocoding lookup and consumed by the weather lookup, the temperature is
//! serialized straight into the response body.

use serde::{Deserialize, Serialize};

/// City resolved from a postal code
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Location {
    /// City name, never empty
    pub city: String,
}

impl Location {
    #[must_use]
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// Current temperature in three scales
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Temperature {
    /// Temperature in Celsius
    pub temp_c: f64,
    /// Temperature in Fahrenheit
    pub temp_f: f64,
    /// Temperature in Kelvin
    pub temp_k: f64,
}

impl Temperature {
    /// Derive Fahrenheit and Kelvin from a Celsius reading
    #[must_use]
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            temp_c: celsius,
            temp_f: Self::celsius_to_fahrenheit(celsius),
            temp_k: Self::celsius_to_kelvin(celsius),
        }
    }

    #[must_use]
    pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
        celsius * 1.8 + 32.0
    }

    #[must_use]
    pub fn celsius_to_kelvin(celsius: f64) -> f64 {
        celsius + 273.15
    }
}
