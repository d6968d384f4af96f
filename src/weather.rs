//! Current temperature lookup against WeatherAPI (`/current.json`)
//!
//! The response is read as a loose `serde_json::Value` and only
//! `current.temp_c` is picked out of it, with explicit type checks at each
//! step. Fahrenheit and Kelvin are derived locally.

use crate::LookupError;
use crate::config::WeatherConfig;
use crate::http::build_client;
use crate::models::Temperature;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

/// Anything that can report the current temperature of a city
#[async_trait]
pub trait TemperatureLookup: Send + Sync {
    async fn resolve(&self, city: &str) -> Result<Temperature, LookupError>;
}

/// Temperature resolver backed by WeatherAPI
#[derive(Clone)]
pub struct TemperatureResolver {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TemperatureResolver {
    /// The API key is taken as-is; an empty key is left for the upstream to reject.
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn current_url(&self, city: &str) -> String {
        format!(
            "{}/current.json?key={}&q={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(city)
        )
    }

    /// Pull `current.temp_c` out of a raw response body
    fn parse_temperature(body: &str) -> Result<Temperature, LookupError> {
        let data: Value = serde_json::from_str(body)
            .map_err(|e| LookupError::parse(format!("invalid weather response: {e}")))?;

        let data = data
            .as_object()
            .ok_or_else(|| LookupError::parse("weather response is not a JSON object"))?;

        let current = data
            .get("current")
            .and_then(Value::as_object)
            .ok_or_else(|| LookupError::schema_mismatch("invalid response from weather API"))?;

        let celsius = current
            .get("temp_c")
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                LookupError::schema_mismatch("invalid temperature data from weather API")
            })?;

        Ok(Temperature::from_celsius(celsius))
    }
}

impl std::fmt::Debug for TemperatureResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemperatureResolver")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TemperatureLookup for TemperatureResolver {
    #[instrument(name = "resolve_temperature", skip(self))]
    async fn resolve(&self, city: &str) -> Result<Temperature, LookupError> {
        let response = self.client.get(self.current_url(city)).send().await?;
        debug!(status = %response.status(), "Weather service responded");

        let body = response.text().await?;
        let temperature = Self::parse_temperature(&body)?;

        debug!(temp_c = temperature.temp_c, "Resolved temperature");
        Ok(temperature)
    }
}
