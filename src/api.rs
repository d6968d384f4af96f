//! HTTP API: `GET /?zipcode=<postal code>`
//!
//! Every path and method is answered by the same handler. It validates the
//! postal code, resolves its city, looks up the city's temperature and answers with `{"temp_c", "temp_f", "temp_k"}`.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::any,
};

use crate::{
    ApiError,
    location_resolver::LocationLookup,
    models::Temperature,
    weather::TemperatureLookup,
};

/// Accepted postal code length, in bytes
pub const ZIPCODE_LENGTH: usize = 8;

/// Shared, read-only state for every request
#[derive(Clone)]
pub struct AppState {
    pub locations: Arc<dyn LocationLookup>,
    pub temperatures: Arc<dyn TemperatureLookup>,
}

impl AppState {
    pub fn new(
        locations: impl LocationLookup + 'static,
        temperatures: impl TemperatureLookup + 'static,
    ) -> Self {
        Self {
            locations: Arc::new(locations),
            temperatures: Arc::new(temperatures),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(get_temperature))
        .fallback(get_temperature)
        .with_state(state)
}

/// First `zipcode` value of the query string, empty when absent.
fn first_zipcode(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find(|(key, _)| key == "zipcode")
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// Only the length is checked; the digits are left to the geocoding service.
fn validate_zipcode(zipcode: &str) -> Result<(), ApiError> {
    if zipcode.len() == ZIPCODE_LENGTH {
        Ok(())
    } else {
        Err(ApiError::InvalidZipcode)
    }
}

async fn get_temperature(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Temperature>, ApiError> {
    let zipcode = first_zipcode(pairs);
    validate_zipcode(&zipcode)?;

    let location = state.locations.resolve(&zipcode).await.map_err(|e| {
        tracing::info!(%zipcode, kind = e.kind(), error = %e, "Location lookup failed");
        ApiError::ZipcodeNotFound
    })?;

    let temperature = state
        .temperatures
        .resolve(&location.city)
        .await
        .map_err(|e| {
            tracing::warn!(city = %location.city, kind = e.kind(), error = %e, "Temperature lookup failed");
            ApiError::TemperatureUnavailable
        })?;

    Ok(Json(temperature))
}
