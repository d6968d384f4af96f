//! Location Resolution Module
//!
//! Resolves a postal code into the city it belongs to through the ViaCEP
//! geocoding service (`GET {base}/{postal_code}/json/`).

use crate::LookupError;
use crate::config::GeocodingConfig;
use crate::http::build_client;
use crate::models::Location;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Anything that can turn a postal code into a city
#[async_trait]
pub trait LocationLookup: Send + Sync {
    async fn resolve(&self, postal_code: &str) -> Result<Location, LookupError>;
}

/// ViaCEP answers unknown codes with `{"erro": true}`, so every field is optional.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    localidade: Option<String>,
}

/// Postal code resolver backed by ViaCEP
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: Client,
    base_url: String,
}

impl LocationResolver {
    pub fn new(config: &GeocodingConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn lookup_url(&self, postal_code: &str) -> String {
        format!(
            "{}/{}/json/",
            self.base_url,
            urlencoding::encode(postal_code)
        )
    }

    /// Extract the city from a raw response body
    fn parse_location(postal_code: &str, body: &str) -> Result<Location, LookupError> {
        let response: ViaCepResponse = serde_json::from_str(body)
            .map_err(|e| LookupError::parse(format!("invalid geocoding response: {e}")))?;

        match response.localidade {
            Some(city) if !city.is_empty() => Ok(Location::new(city)),
            _ => Err(LookupError::not_found(format!(
                "city not found for zipcode {postal_code}"
            ))),
        }
    }
}

#[async_trait]
impl LocationLookup for LocationResolver {
    #[instrument(name = "resolve_location", skip(self))]
    async fn resolve(&self, postal_code: &str) -> Result<Location, LookupError> {
        let response = self.client.get(self.lookup_url(postal_code)).send().await?;
        debug!(status = %response.status(), "Geocoding service responded");

        let body = response.text().await?;
        let location = Self::parse_location(postal_code, &body)?;

        debug!(city = %location.city, "Resolved postal code");
        Ok(location)
    }
}
