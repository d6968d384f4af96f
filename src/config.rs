//! Configuration management for the zipcode weather service
//!
//! Handles loading configuration from an optional TOML file, a `.env` file
//! and environment variables, and validates the result once at startup. The loaded
//! `AppConfig` is immutable and handed to the components that need it.

use crate::ZipWeatherError;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Prefix for structured environment overrides, e.g. `ZIPCODE_WEATHER_WEATHER__TIMEOUT_SECONDS`
pub const ENV_PREFIX: &str = "ZIPCODE_WEATHER";
/// Environment variable pointing at an alternative config file
pub const CONFIG_PATH_VAR: &str = "ZIPCODE_WEATHER_CONFIG";
/// Conventional variable holding the weather API key
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";
/// Conventional variable holding the listening port
pub const PORT_VAR: &str = "PORT";
/// Dotenv file read at startup, relative to the working directory
pub const DOTENV_FILE: &str = ".env";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Postal code lookup service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL, the postal code is appended as a path segment
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Weather API settings
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API key, may be empty
    #[serde(default)]
    pub api_key: String,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &if self.api_key.is_empty() { "<empty>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_geocoding_base_url() -> String {
    "https://viacep.com.br/ws".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment, `.env` and the default file
    pub fn load() -> Result<Self> {
        let vars = environment_with_dotenv(Path::new(DOTENV_FILE))?;
        let config_path = vars.get(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::load_from(config_path, Some(vars))
    }

    /// Load configuration from an explicit file and environment.
    ///
    /// `vars` replaces the process environment when given.
    pub fn load_from(
        config_path: Option<PathBuf>,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars.clone()),
        );

        // The conventional variables win over everything else
        builder = builder
            .set_override_option("weather.api_key", lookup_var(vars.as_ref(), API_KEY_VAR))
            .with_context(|| format!("Failed to apply {API_KEY_VAR}"))?
            .set_override_option("server.port", lookup_var(vars.as_ref(), PORT_VAR))
            .with_context(|| format!("Failed to apply {PORT_VAR}"))?;

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ZipWeatherError::config("Server port cannot be 0").into());
        }

        for (name, timeout) in [
            ("Geocoding", self.geocoding.timeout_seconds),
            ("Weather", self.weather.timeout_seconds),
        ] {
            if timeout == 0 || timeout > 300 {
                return Err(ZipWeatherError::config(format!(
                    "{name} timeout must be between 1 and 300 seconds"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ZipWeatherError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ZipWeatherError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding", &self.geocoding.base_url),
            ("Weather", &self.weather.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ZipWeatherError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

/// Entries of a dotenv file, `None` when the file does not exist.
pub fn read_dotenv(path: &Path) -> Result<Option<HashMap<String, String>>> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to open {}", path.display())),
    };

    let vars = entries
        .collect::<std::result::Result<HashMap<_, _>, _>>()
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(vars))
}

/// Process environment layered over the dotenv file; real variables win.
fn environment_with_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    let mut vars = read_dotenv(path)?.unwrap_or_default();
    vars.extend(
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
    );
    Ok(vars)
}

/// Empty values count as unset.
fn lookup_var(vars: Option<&HashMap<String, String>>, key: &str) -> Option<String> {
    match vars {
        Some(vars) => vars.get(key).cloned(),
        None => std::env::var(key).ok(),
    }
    .filter(|value| !value.is_empty())
}
