//! Error types shared across the Clima workspace.
//!
//! Every enum offers `user_message()` for display; the `Display` impls keep
//! the technical detail for logs.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Failures of a geocoding or weather request.
///
/// A city that does not resolve is not an error; resolvers report it as `None`.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request never completed (connection refused, DNS, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response arrived with a non-success status.
    #[error("Upstream returned HTTP {status}")]
    Upstream { status: u16 },

    /// A response body that is not valid JSON.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        "Failed to fetch data. Please try again later."
    }

    /// HTTP status of an upstream failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Parse(e.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not available")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Configuration IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => "No configuration directory found. Use --config.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Io(_) => "Could not read or write the configuration file.",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::Weather(WeatherError::Upstream { status: 500 }),
            AppError::Weather(WeatherError::Parse("eof".into())),
            AppError::Config(ConfigError::Invalid("test".into())),
            AppError::Config(ConfigError::NoConfigDir),
            AppError::Other(anyhow::anyhow!("boom")),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "empty message for {err}");
        }
    }

    #[test]
    fn test_weather_errors_share_retry_later_message() {
        let upstream = WeatherError::Upstream { status: 404 };
        let parse = WeatherError::Parse("expected value".into());
        assert_eq!(upstream.user_message(), parse.user_message());
        assert!(upstream.user_message().contains("try again later"));
    }

    #[test]
    fn test_status_only_for_upstream() {
        assert_eq!(WeatherError::Upstream { status: 503 }.status(), Some(503));
        assert_eq!(WeatherError::Parse("x".into()).status(), None);
    }

    #[test]
    fn test_serde_error_maps_to_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{not json")
            .map_err(WeatherError::from)
            .unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[test]
    fn test_app_error_delegates_to_inner_message() {
        let app: AppError = WeatherError::Upstream { status: 502 }.into();
        assert_eq!(
            app.user_message(),
            WeatherError::Upstream { status: 502 }.user_message()
        );
        assert!(app.to_string().contains("502"));
    }
}
