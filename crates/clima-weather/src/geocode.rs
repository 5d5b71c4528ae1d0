//! Forward geocoding: city name to coordinates via the Open-Meteo search API.

use std::sync::Arc;

use clima_core::WeatherError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::cache::WeatherCache;
use crate::http::read_json;
use crate::types::CoordinateResult;

/// Matches are kept raw; only the first one is ever projected.
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

/// Resolves city names, consulting the coordinates cache first.
#[derive(Debug, Clone)]
pub struct GeocodingResolver {
    client: Client,
    base_url: String,
    language: String,
    cache: Arc<WeatherCache>,
}

impl GeocodingResolver {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        language: impl Into<String>,
        cache: Arc<WeatherCache>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            language: language.into(),
            cache,
        }
    }

    /// Resolve `city_name` to the first upstream match.
    ///
    /// `Ok(None)` means the upstream knows no such city; that outcome is not
    /// cached. The name is used verbatim as the cache key.
    #[instrument(skip(self), level = "debug")]
    pub async fn resolve(
        &self,
        city_name: &str,
    ) -> Result<Option<Arc<CoordinateResult>>, WeatherError> {
        if let Some(cached) = self.cache.coordinates.get(city_name) {
            tracing::debug!("Coordinates for {:?} served from cache", city_name);
            return Ok(Some(cached));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", city_name),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;
        tracing::debug!("Geocoding request sent: {}", response.url());

        let body: GeocodingResponse = serde_json::from_value(read_json(response).await?)?;

        let Some(first) = body.results.and_then(|results| results.into_iter().next()) else {
            tracing::info!("No city found for {:?}", city_name);
            return Ok(None);
        };
        let first: CoordinateResult = serde_json::from_value(first)?;

        tracing::debug!(
            "Resolved {:?} to {} ({}) at {}, {}",
            city_name,
            first.name,
            first.country,
            first.latitude,
            first.longitude
        );
        Ok(Some(self.cache.coordinates.set(city_name, first)))
    }
}
