//! Shared HTTP plumbing for the geocoding and forecast requests.

use std::time::Duration;

use clima_core::{WeatherConfig, WeatherError};
use reqwest::{Client, Response};
use serde_json::Value;

const USER_AGENT: &str = concat!("clima/", env!("CARGO_PKG_VERSION"));

/// Build the client shared by the resolver and the provider.
///
/// No timeout is applied unless `request_timeout_secs` is configured.
pub fn build_client(config: &WeatherConfig) -> Result<Client, WeatherError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Check the status and parse the body as JSON.
pub(crate) async fn read_json(response: Response) -> Result<Value, WeatherError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("Upstream returned {}: {}", status, body);
        return Err(WeatherError::Upstream {
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
