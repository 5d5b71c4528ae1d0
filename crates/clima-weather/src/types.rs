use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    RimeFog,
    Drizzle,
    FreezingDrizzle,
    Rain,
    HeavyRain,
    FreezingRain,
    Snow,
    SnowGrains,
    RainShowers,
    ViolentRainShowers,
    SnowShowers,
    Thunderstorm,
    ThunderstormWithHail,
    Unknown,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 => Self::Fog,
            48 => Self::RimeFog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 => Self::FreezingDrizzle,
            61 | 63 => Self::Rain,
            65 => Self::HeavyRain,
            66 | 67 => Self::FreezingRain,
            71 | 73 | 75 => Self::Snow,
            77 => Self::SnowGrains,
            80 | 81 => Self::RainShowers,
            82 => Self::ViolentRainShowers,
            85 | 86 => Self::SnowShowers,
            95 => Self::Thunderstorm,
            96 | 99 => Self::ThunderstormWithHail,
            _ => Self::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::MainlyClear => "Mainly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::RimeFog => "Depositing rime fog",
            Self::Drizzle => "Drizzle",
            Self::FreezingDrizzle => "Freezing drizzle",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy rain",
            Self::FreezingRain => "Freezing rain",
            Self::Snow => "Snow",
            Self::SnowGrains => "Snow grains",
            Self::RainShowers => "Rain showers",
            Self::ViolentRainShowers => "Violent rain showers",
            Self::SnowShowers => "Snow showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormWithHail => "Thunderstorm with hail",
            Self::Unknown => "Unknown conditions",
        }
    }
}

/// First geocoding match for a city name.
///
/// Coordinates are taken as the upstream reports them; ranges are not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub country: String,
}

/// Weather response kept as the upstream sent it.
///
/// Accessors project the handful of fields the app reads and return `None`
/// for anything missing or mistyped.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPayload {
    raw: Value,
}

impl WeatherPayload {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn latitude(&self) -> Option<f64> {
        self.raw.get("latitude").and_then(Value::as_f64)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.raw.get("longitude").and_then(Value::as_f64)
    }

    pub fn timezone(&self) -> Option<&str> {
        self.raw.get("timezone").and_then(Value::as_str)
    }

    /// Current conditions, if the `current` block carries every reading
    pub fn current(&self) -> Option<CurrentConditions> {
        let current = self.raw.get("current")?;
        CurrentConditions::deserialize(current).ok()
    }

    /// Daily aggregates zipped by date. Empty when no `daily` block was requested.
    pub fn daily(&self) -> Vec<DayForecast> {
        let Some(daily) = self.raw.get("daily") else {
            return Vec::new();
        };
        let block = match DailyBlock::deserialize(daily) {
            Ok(block) => block,
            Err(e) => {
                tracing::debug!("Ignoring malformed daily block: {}", e);
                return Vec::new();
            }
        };

        block
            .time
            .iter()
            .enumerate()
            .filter_map(|(i, date)| {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
                Some(DayForecast {
                    date,
                    high: block.temperature_2m_max.get(i).copied().flatten(),
                    low: block.temperature_2m_min.get(i).copied().flatten(),
                    condition: block
                        .weathercode
                        .get(i)
                        .copied()
                        .flatten()
                        .map(WeatherCondition::from_wmo_code),
                })
            })
            .collect()
    }
}

/// Current conditions as reported by the `current` block
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "apparent_temperature")]
    pub feels_like: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: f64,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    #[serde(default)]
    pub weather_code: Option<i32>,
}

impl CurrentConditions {
    pub fn condition(&self) -> WeatherCondition {
        self.weather_code
            .map(WeatherCondition::from_wmo_code)
            .unwrap_or(WeatherCondition::Unknown)
    }
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default, alias = "weather_code")]
    weathercode: Vec<Option<i32>>,
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub condition: Option<WeatherCondition>,
}

/// Result of a single-city lookup
#[derive(Debug, Clone)]
pub struct CityWeather {
    /// City name exactly as the caller asked for it
    pub query: String,
    pub coordinates: Arc<CoordinateResult>,
    pub weather: Arc<WeatherPayload>,
}

/// One row of a multi-city comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityComparisonEntry {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityComparisonEntry {
    /// Build a row from a resolved city and its weather; `None` without current conditions.
    pub fn from_parts(coordinates: &CoordinateResult, weather: &WeatherPayload) -> Option<Self> {
        let current = weather.current()?;
        Some(Self {
            city: coordinates.name.clone(),
            country: coordinates.country.clone(),
            temperature: current.temperature,
            feels_like: current.feels_like,
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use serde_json::json;

    fn sao_paulo_payload() -> WeatherPayload {
        WeatherPayload::new(json!({
            "latitude": -23.5,
            "longitude": -46.625,
            "timezone": "America/Sao_Paulo",
            "current": {
                "time": "2026-10-18T14:00",
                "temperature_2m": 24.3,
                "relative_humidity_2m": 65,
                "apparent_temperature": 25.1,
                "weather_code": 2,
                "wind_speed_10m": 11.8
            },
            "daily": {
                "time": ["2026-10-18", "2026-10-19"],
                "temperature_2m_max": [27.0, null],
                "temperature_2m_min": [17.2, 16.0],
                "weathercode": [2, 61]
            }
        }))
    }

    #[test]
    fn test_wmo_codes() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_wmo_code(1), WeatherCondition::MainlyClear);
        assert_eq!(WeatherCondition::from_wmo_code(48), WeatherCondition::RimeFog);
        assert_eq!(WeatherCondition::from_wmo_code(57), WeatherCondition::FreezingDrizzle);
        assert_eq!(WeatherCondition::from_wmo_code(65), WeatherCondition::HeavyRain);
        assert_eq!(WeatherCondition::from_wmo_code(82), WeatherCondition::ViolentRainShowers);
        assert_eq!(WeatherCondition::from_wmo_code(86), WeatherCondition::SnowShowers);
        assert_eq!(WeatherCondition::from_wmo_code(99), WeatherCondition::ThunderstormWithHail);
    }

    #[test]
    fn test_wmo_code_unknown() {
        assert_eq!(WeatherCondition::from_wmo_code(4), WeatherCondition::Unknown);
        assert_eq!(WeatherCondition::from_wmo_code(-1), WeatherCondition::Unknown);
        assert_eq!(WeatherCondition::Unknown.description(), "Unknown conditions");
    }

    #[test]
    fn test_payload_top_level_fields() {
        let payload = sao_paulo_payload();
        assert_eq!(payload.latitude(), Some(-23.5));
        assert_eq!(payload.longitude(), Some(-46.625));
        assert_eq!(payload.timezone(), Some("America/Sao_Paulo"));
    }

    #[test]
    fn test_current_projection() {
        let current = sao_paulo_payload().current().unwrap();
        assert_eq!(current.temperature, 24.3);
        assert_eq!(current.feels_like, 25.1);
        assert_eq!(current.humidity, 65.0);
        assert_eq!(current.wind_speed, 11.8);
        assert_eq!(current.condition(), WeatherCondition::PartlyCloudy);
    }

    #[test]
    fn test_current_missing_reading_is_none() {
        let payload = WeatherPayload::new(json!({
            "current": { "temperature_2m": 20.0 }
        }));
        assert!(payload.current().is_none());
        assert!(WeatherPayload::new(json!({})).current().is_none());
    }

    #[test]
    fn test_current_without_code_is_unknown() {
        let payload = WeatherPayload::new(json!({
            "current": {
                "temperature_2m": 20.0,
                "relative_humidity_2m": 50,
                "apparent_temperature": 19.0,
                "wind_speed_10m": 5.0
            }
        }));
        assert_eq!(payload.current().unwrap().condition(), WeatherCondition::Unknown);
    }

    #[test]
    fn test_daily_projection() {
        let days = sao_paulo_payload().daily();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert_eq!(days[0].high, Some(27.0));
        assert_eq!(days[0].condition, Some(WeatherCondition::PartlyCloudy));
        assert_eq!(days[1].high, None);
        assert_eq!(days[1].low, Some(16.0));
        assert_eq!(days[1].condition, Some(WeatherCondition::Rain));
    }

    #[test]
    fn test_daily_absent_or_short_arrays() {
        assert!(WeatherPayload::new(json!({"current": {}})).daily().is_empty());

        let payload = WeatherPayload::new(json!({
            "daily": { "time": ["2026-10-18", "bad-date", "2026-10-20"], "weather_code": [3] }
        }));
        let days = payload.daily();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].condition, Some(WeatherCondition::Overcast));
        assert_eq!(days[1].condition, None);
        assert_eq!(days[1].high, None);
    }

    #[test]
    fn test_comparison_entry_from_parts() {
        let coords = CoordinateResult {
            latitude: -23.5505,
            longitude: -46.6333,
            name: "São Paulo".to_string(),
            country: "Brasil".to_string(),
        };
        let entry = CityComparisonEntry::from_parts(&coords, &sao_paulo_payload()).unwrap();
        assert_eq!(entry.city, "São Paulo");
        assert_eq!(entry.country, "Brasil");
        assert_eq!(entry.temperature, 24.3);
        assert_eq!(entry.latitude, -23.5505);

        let empty = WeatherPayload::new(json!({}));
        assert!(CityComparisonEntry::from_parts(&coords, &empty).is_none());
    }
}
