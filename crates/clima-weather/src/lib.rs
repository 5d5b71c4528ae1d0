//! Weather lookups for Clima
//!
//! Resolves city names through Open-Meteo geocoding, fetches current
//! conditions and forecasts from Open-Meteo, and keeps both in a ten minute
//! in-memory cache.

pub mod cache;
pub mod compare;
pub mod geocode;
pub mod http;
pub mod observer;
pub mod provider;
pub mod service;
pub mod types;

pub use cache::{CacheStore, WeatherCache, CACHE_TTL_MS};
pub use clima_core::WeatherError;
pub use geocode::GeocodingResolver;
pub use observer::{SearchHistory, WeatherObserver};
pub use provider::WeatherProvider;
pub use service::WeatherService;
pub use types::*;
