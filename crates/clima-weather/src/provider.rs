//! Current conditions and daily forecasts from the Open-Meteo forecast API.

use std::sync::Arc;

use clima_core::WeatherError;
use reqwest::Client;
use tracing::instrument;

use crate::cache::WeatherCache;
use crate::http::read_json;
use crate::types::WeatherPayload;

/// Readings requested for the `current` block
pub const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m";

/// Aggregates requested for the `daily` block of forecast lookups
pub const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

/// Cache key for current conditions at a coordinate pair.
pub fn cache_key(latitude: f64, longitude: f64) -> String {
    format!("{},{}", latitude, longitude)
}

fn forecast_cache_key(latitude: f64, longitude: f64, days: u8) -> String {
    format!("{}#{}d", cache_key(latitude, longitude), days)
}

/// Fetches weather by coordinates, consulting the weather cache first.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
    cache: Arc<WeatherCache>,
}

impl WeatherProvider {
    pub fn new(client: Client, base_url: impl Into<String>, cache: Arc<WeatherCache>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            cache,
        }
    }

    /// Current conditions at a point. There is no "not found": any missing
    /// data surfaces as an error.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Arc<WeatherPayload>, WeatherError> {
        self.fetch_cached(latitude, longitude, None).await
    }

    /// Current conditions plus `days` of daily aggregates.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Arc<WeatherPayload>, WeatherError> {
        self.fetch_cached(latitude, longitude, Some(days)).await
    }

    async fn fetch_cached(
        &self,
        latitude: f64,
        longitude: f64,
        days: Option<u8>,
    ) -> Result<Arc<WeatherPayload>, WeatherError> {
        let key = match days {
            Some(days) => forecast_cache_key(latitude, longitude, days),
            None => cache_key(latitude, longitude),
        };

        if let Some(cached) = self.cache.weather.get(&key) {
            tracing::debug!("Weather for {} served from cache", key);
            return Ok(cached);
        }

        let mut query = vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];
        if let Some(days) = days {
            query.push(("daily", DAILY_FIELDS.to_string()));
            query.push(("forecast_days", days.to_string()));
        }

        let response = self.client.get(&self.base_url).query(&query).send().await?;
        tracing::debug!("Weather request sent: {}", response.url());

        let payload = WeatherPayload::new(read_json(response).await?);
        Ok(self.cache.weather.set(key, payload))
    }
}
