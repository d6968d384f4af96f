//! Error types and handling for the zipcode weather service

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Process-level error type for the zipcode weather service
#[derive(Error, Debug)]
pub enum ZipWeatherError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ZipWeatherError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ZipWeatherError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            ZipWeatherError::Io { .. } => {
                "Network setup failed. Please check that the port is free.".to_string()
            }
        }
    }
}

/// Failure of a single upstream lookup
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

impl LookupError {
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn schema_mismatch<S: Into<String>>(message: S) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Short label for log fields
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Transport { .. } => "transport",
            LookupError::Parse { .. } => "parse",
            LookupError::NotFound { .. } => "not_found",
            LookupError::SchemaMismatch { .. } => "schema_mismatch",
        }
    }
}

/// Errors surfaced to the HTTP caller.
///
/// Every location failure collapses into `ZipcodeNotFound` and every
/// temperature failure into `TemperatureUnavailable`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid zipcode")]
    InvalidZipcode,

    #[error("can not find zipcode")]
    ZipcodeNotFound,

    #[error("failed to get temperature")]
    TemperatureUnavailable,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidZipcode => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ZipcodeNotFound => StatusCode::NOT_FOUND,
            ApiError::TemperatureUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), format!("{self}\n")).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}
