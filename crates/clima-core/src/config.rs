use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Open-Meteo accepts at most 16 forecast days.
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// All errors joined into a single line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream endpoints and request settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Geocoding search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Forecast endpoint (current conditions and daily aggregates)
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Language for geocoding results
    #[serde(default = "default_language")]
    pub language: String,

    /// Days requested by forecast lookups when the caller gives none
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_language() -> String {
    "pt".to_string()
}

fn default_forecast_days() -> u8 {
    5
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            language: default_language(),
            forecast_days: default_forecast_days(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("Creating default config at {}", path.display());
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration and reject it if validation finds errors.
    ///
    /// Warnings are logged and returned with the config.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult), ConfigError> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.weather.geocoding_url, "weather.geocoding_url", &mut result);
        validate_url(&self.weather.forecast_url, "weather.forecast_url", &mut result);

        if self.weather.forecast_days == 0 {
            result.add_error("weather.forecast_days", "Must request at least one day");
        } else if self.weather.forecast_days > MAX_FORECAST_DAYS {
            result.add_error(
                "weather.forecast_days",
                format!("At most {} days are available", MAX_FORECAST_DAYS),
            );
        }

        if self.weather.language.trim().is_empty() {
            result.add_warning("weather.language", "Empty language, upstream default applies");
        }

        match self.weather.request_timeout_secs {
            Some(0) => result.add_error("weather.request_timeout_secs", "Timeout must be > 0"),
            Some(secs) if secs > 300 => result.add_warning(
                "weather.request_timeout_secs",
                "Timeout is unusually long (>5 minutes)",
            ),
            _ => {}
        }

        result
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Default path of the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("clima").join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }
            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
            if url.port() == Some(0) {
                result.add_error(field_name, "Port cannot be 0");
            }
        }
        Err(e) => result.add_error(field_name, format!("Invalid URL: {}", e)),
    }
}
