//! Multi-city comparison.
//!
//! Cities are looked up independently and any city that fails (not found,
//! HTTP error, unusable payload) is left out instead of failing the batch.

use futures::future::join_all;

use crate::geocode::GeocodingResolver;
use crate::provider::WeatherProvider;
use crate::types::CityComparisonEntry;

/// Split a comma-separated list of city names, trimming each and dropping blanks.
pub fn parse_city_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Look up every city concurrently; the result keeps input order and omits failures.
///
/// An empty result means none of the cities could be resolved.
pub async fn compare<S: AsRef<str>>(
    resolver: &GeocodingResolver,
    provider: &WeatherProvider,
    city_names: &[S],
) -> Vec<CityComparisonEntry> {
    let lookups = city_names
        .iter()
        .map(|name| compare_one(resolver, provider, name.as_ref()));

    let entries: Vec<_> = join_all(lookups).await.into_iter().flatten().collect();
    tracing::debug!(
        "Comparison resolved {} of {} cities",
        entries.len(),
        city_names.len()
    );
    entries
}

async fn compare_one(
    resolver: &GeocodingResolver,
    provider: &WeatherProvider,
    city_name: &str,
) -> Option<CityComparisonEntry> {
    let coordinates = match resolver.resolve(city_name).await {
        Ok(Some(coordinates)) => coordinates,
        Ok(None) => {
            tracing::info!("Skipping {:?}: city not found", city_name);
            return None;
        }
        Err(e) => {
            tracing::warn!("Skipping {:?}: geocoding failed: {}", city_name, e);
            return None;
        }
    };

    let weather = match provider
        .fetch(coordinates.latitude, coordinates.longitude)
        .await
    {
        Ok(weather) => weather,
        Err(e) => {
            tracing::warn!("Skipping {:?}: weather fetch failed: {}", city_name, e);
            return None;
        }
    };

    let entry = CityComparisonEntry::from_parts(&coordinates, &weather);
    if entry.is_none() {
        tracing::warn!("Skipping {:?}: no current conditions in payload", city_name);
    }
    entry
}

/// Leftmost entry for which no later entry is strictly `better`.
fn pick_by<F>(entries: &[CityComparisonEntry], better: F) -> Option<&CityComparisonEntry>
where
    F: Fn(&CityComparisonEntry, &CityComparisonEntry) -> bool,
{
    let mut iter = entries.iter();
    let mut best = iter.next()?;
    for entry in iter {
        if better(entry, best) {
            best = entry;
        }
    }
    Some(best)
}

pub fn hottest(entries: &[CityComparisonEntry]) -> Option<&CityComparisonEntry> {
    pick_by(entries, |a, b| a.temperature > b.temperature)
}

pub fn coldest(entries: &[CityComparisonEntry]) -> Option<&CityComparisonEntry> {
    pick_by(entries, |a, b| a.temperature < b.temperature)
}

pub fn most_humid(entries: &[CityComparisonEntry]) -> Option<&CityComparisonEntry> {
    pick_by(entries, |a, b| a.humidity > b.humidity)
}

pub fn windiest(entries: &[CityComparisonEntry]) -> Option<&CityComparisonEntry> {
    pick_by(entries, |a, b| a.wind_speed > b.wind_speed)
}

pub fn mean_temperature(entries: &[CityComparisonEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: f64 = entries.iter().map(|e| e.temperature).sum();
    Some(total / entries.len() as f64)
}
