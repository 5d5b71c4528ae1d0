//! Plain-text rendering of lookup results.

use chrono::NaiveDate;
use clima_weather::compare::{coldest, hottest, mean_temperature, most_humid, windiest};
use clima_weather::{CityComparisonEntry, CityWeather, CoordinateResult, DayForecast};

/// Round to a whole number; adding zero turns `-0` into `0`.
fn whole(value: f64) -> f64 {
    value.round() + 0.0
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", whole(celsius))
}

pub fn format_wind_speed(kmh: f64) -> String {
    format!("{} km/h", whole(kmh))
}

pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{:.2}°N, {:.2}°E", latitude, longitude)
}

fn place_label(coords: &CoordinateResult) -> String {
    if coords.country.is_empty() {
        coords.name.clone()
    } else {
        format!("{}, {}", coords.name, coords.country)
    }
}

pub fn not_found(city_name: &str) -> String {
    format!("City \"{}\" not found. Please try again.", city_name)
}

pub fn nothing_resolved() -> &'static str {
    "None of the cities could be resolved."
}

/// Current conditions, and the daily forecast when the payload has one.
pub fn city_weather(result: &CityWeather, today: NaiveDate) -> String {
    let coords = &result.coordinates;
    let mut lines = vec![
        place_label(coords),
        format!(
            "{} | {}",
            format_coordinates(coords.latitude, coords.longitude),
            today.format("%A, %-d %B %Y")
        ),
    ];

    match result.weather.current() {
        Some(current) => {
            lines.push(format!(
                "  {}  {}",
                format_temperature(current.temperature),
                current.condition().description()
            ));
            lines.push(format!("  Feels like: {}", format_temperature(current.feels_like)));
            lines.push(format!("  Humidity:   {}%", current.humidity));
            lines.push(format!("  Wind:       {}", format_wind_speed(current.wind_speed)));
        }
        None => lines.push("  Current conditions unavailable.".to_string()),
    }

    let daily = result.weather.daily();
    if !daily.is_empty() {
        lines.push(String::new());
        lines.push("  Forecast:".to_string());
        lines.extend(daily.iter().map(forecast_line));
    }

    lines.join("\n")
}

fn forecast_line(day: &DayForecast) -> String {
    let high = day.high.map(format_temperature).unwrap_or_else(|| "--".to_string());
    let low = day.low.map(format_temperature).unwrap_or_else(|| "--".to_string());
    let condition = day.condition.map(|c| c.description()).unwrap_or("");
    format!(
        "  {}  {:>5} / {:<5}  {}",
        day.date.format("%a %d/%m"),
        high,
        low,
        condition
    )
    .trim_end()
    .to_string()
}

/// Table of compared cities followed by the extremes.
pub fn comparison(entries: &[CityComparisonEntry]) -> String {
    if entries.is_empty() {
        return nothing_resolved().to_string();
    }

    let width = entries
        .iter()
        .map(|e| e.city.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut lines = vec![format!(
        "{:<width$}  {:>6}  {:>10}  {:>8}  {:>9}",
        "City", "Temp", "Feels like", "Humidity", "Wind"
    )];
    for e in entries {
        lines.push(format!(
            "{:<width$}  {:>6}  {:>10}  {:>7}%  {:>9}",
            e.city,
            format_temperature(e.temperature),
            format_temperature(e.feels_like),
            e.humidity,
            format_wind_speed(e.wind_speed)
        ));
    }

    if entries.len() > 1 {
        lines.push(String::new());
        if let Some(e) = hottest(entries) {
            lines.push(format!("Hottest:       {} ({})", e.city, format_temperature(e.temperature)));
        }
        if let Some(e) = coldest(entries) {
            lines.push(format!("Coldest:       {} ({})", e.city, format_temperature(e.temperature)));
        }
        if let Some(mean) = mean_temperature(entries) {
            lines.push(format!("Average:       {:.1}°C", mean));
        }
        if let Some(e) = most_humid(entries) {
            lines.push(format!("Most humid:    {} ({}%)", e.city, e.humidity));
        }
        if let Some(e) = windiest(entries) {
            lines.push(format!("Windiest:      {} ({})", e.city, format_wind_speed(e.wind_speed)));
        }
    }

    lines.join("\n")
}

pub fn history(recent: &[String]) -> String {
    if recent.is_empty() {
        return "No searches yet.".to_string();
    }
    recent
        .iter()
        .enumerate()
        .map(|(i, city)| format!("{:>2}. {}", i + 1, city))
        .collect::<Vec<_>>()
        .join("\n")
}
