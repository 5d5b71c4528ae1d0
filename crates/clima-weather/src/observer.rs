//! Hooks run after a successful single-city lookup.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::types::CityWeather;

/// Notified, in registration order, after each successful lookup.
pub trait WeatherObserver: Send + Sync {
    fn on_lookup(&self, result: &CityWeather);
}

impl<F> WeatherObserver for F
where
    F: Fn(&CityWeather) + Send + Sync,
{
    fn on_lookup(&self, result: &CityWeather) {
        self(result)
    }
}

/// Bounded in-memory list of recently resolved cities, most recent first.
#[derive(Debug)]
pub struct SearchHistory {
    capacity: usize,
    entries: Mutex<VecDeque<String>>,
}

impl SearchHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn recent(&self) -> Vec<String> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn record(&self, label: String) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock();
        entries.retain(|existing| existing != &label);
        entries.push_front(label);
        entries.truncate(self.capacity);
    }
}

impl WeatherObserver for SearchHistory {
    fn on_lookup(&self, result: &CityWeather) {
        let coords = &result.coordinates;
        let label = if coords.country.is_empty() {
            coords.name.clone()
        } else {
            format!("{}, {}", coords.name, coords.country)
        };
        self.record(label);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::types::{CoordinateResult, WeatherPayload};
    use std::sync::Arc;

    fn lookup(name: &str, country: &str) -> CityWeather {
        CityWeather {
            query: name.to_lowercase(),
            coordinates: Arc::new(CoordinateResult {
                latitude: 0.0,
                longitude: 0.0,
                name: name.to_string(),
                country: country.to_string(),
            }),
            weather: Arc::new(WeatherPayload::new(serde_json::json!({}))),
        }
    }

    #[test]
    fn test_history_most_recent_first() {
        let history = SearchHistory::new(5);
        history.on_lookup(&lookup("Recife", "Brasil"));
        history.on_lookup(&lookup("Lisboa", "Portugal"));
        assert_eq!(history.recent(), vec!["Lisboa, Portugal", "Recife, Brasil"]);
    }

    #[test]
    fn test_history_dedupes_and_truncates() {
        let history = SearchHistory::new(2);
        history.on_lookup(&lookup("Recife", "Brasil"));
        history.on_lookup(&lookup("Lisboa", "Portugal"));
        history.on_lookup(&lookup("Recife", "Brasil"));
        history.on_lookup(&lookup("Null Island", ""));

        assert_eq!(history.recent(), vec!["Null Island", "Recife, Brasil"]);

        history.clear();
        assert!(history.recent().is_empty());
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let history = SearchHistory::new(0);
        history.on_lookup(&lookup("Recife", "Brasil"));
        assert!(history.recent().is_empty());
    }

    #[test]
    fn test_closure_observer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer = move |result: &CityWeather| sink.lock().push(result.query.clone());

        observer.on_lookup(&lookup("Recife", "Brasil"));
        assert_eq!(*seen.lock(), vec!["recife".to_string()]);
    }
}
