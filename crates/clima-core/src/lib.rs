pub mod config;
pub mod error;

pub use config::{Config, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError, WeatherError};

use anyhow::Result;

/// Initialize logging. `RUST_LOG` wins over `default_filter` when set.
///
/// Output goes to stderr so it never interleaves with rendered results.
pub fn init_with_default_filter(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Clima core initialized");
    Ok(())
}
