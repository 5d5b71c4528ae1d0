use std::sync::Arc;

use clima_core::{WeatherConfig, WeatherError};
use reqwest::Client;

use crate::cache::WeatherCache;
use crate::compare;
use crate::geocode::GeocodingResolver;
use crate::http::build_client;
use crate::observer::WeatherObserver;
use crate::provider::WeatherProvider;
use crate::types::{CityComparisonEntry, CityWeather};

/// Entry point for the rendering layer: single-city lookups, forecasts and comparisons.
///
/// Owns the cache shared by its resolver and provider; observers run after
/// every successful single-city lookup.
pub struct WeatherService {
    cache: Arc<WeatherCache>,
    resolver: GeocodingResolver,
    provider: WeatherProvider,
    observers: Vec<Arc<dyn WeatherObserver>>,
    default_forecast_days: u8,
}

impl WeatherService {
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = build_client(config)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &WeatherConfig) -> Self {
        let cache = Arc::new(WeatherCache::new());
        let resolver = GeocodingResolver::new(
            client.clone(),
            config.geocoding_url.clone(),
            config.language.clone(),
            Arc::clone(&cache),
        );
        let provider = WeatherProvider::new(client, config.forecast_url.clone(), Arc::clone(&cache));

        Self {
            cache,
            resolver,
            provider,
            observers: Vec::new(),
            default_forecast_days: config.forecast_days,
        }
    }

    pub fn cache(&self) -> &Arc<WeatherCache> {
        &self.cache
    }

    pub fn default_forecast_days(&self) -> u8 {
        self.default_forecast_days
    }

    pub fn add_observer(&mut self, observer: Arc<dyn WeatherObserver>) {
        self.observers.push(observer);
    }

    /// Resolve `city_name` and fetch its current conditions.
    ///
    /// `Ok(None)` when the city is unknown; request failures propagate.
    pub async fn lookup(&self, city_name: &str) -> Result<Option<CityWeather>, WeatherError> {
        self.lookup_with(city_name, None).await
    }

    /// Like [`lookup`](Self::lookup) with a daily forecast; `None` uses the configured day count.
    pub async fn lookup_forecast(
        &self,
        city_name: &str,
        days: Option<u8>,
    ) -> Result<Option<CityWeather>, WeatherError> {
        self.lookup_with(city_name, Some(days.unwrap_or(self.default_forecast_days)))
            .await
    }

    /// Compare several cities, leaving out any that fail.
    pub async fn compare<S: AsRef<str>>(&self, city_names: &[S]) -> Vec<CityComparisonEntry> {
        compare::compare(&self.resolver, &self.provider, city_names).await
    }

    async fn lookup_with(
        &self,
        city_name: &str,
        forecast_days: Option<u8>,
    ) -> Result<Option<CityWeather>, WeatherError> {
        let Some(coordinates) = self.resolver.resolve(city_name).await? else {
            return Ok(None);
        };

        let weather = match forecast_days {
            Some(days) => {
                self.provider
                    .fetch_forecast(coordinates.latitude, coordinates.longitude, days)
                    .await?
            }
            None => {
                self.provider
                    .fetch(coordinates.latitude, coordinates.longitude)
                    .await?
            }
        };

        let result = CityWeather {
            query: city_name.to_string(),
            coordinates,
            weather,
        };
        for observer in &self.observers {
            observer.on_lookup(&result);
        }
        tracing::info!("Weather lookup for {:?} complete", city_name);
        Ok(Some(result))
    }
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService")
            .field("cache", &self.cache)
            .field("observers", &self.observers.len())
            .field("default_forecast_days", &self.default_forecast_days)
            .finish_non_exhaustive()
    }
}
