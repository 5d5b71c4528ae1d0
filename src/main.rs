mod input;
mod render;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clima_core::{AppError, Config};
use clima_weather::{SearchHistory, WeatherService};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::input::{parse_query, Query};

const HISTORY_SIZE: usize = 10;

#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Current weather and forecasts by city name")]
struct Cli {
    /// City name, several names, or a comma-separated list to compare
    #[arg(value_name = "CITY")]
    cities: Vec<String>,

    /// Include the daily forecast; `--forecast=DAYS` overrides the configured day count
    #[arg(
        short,
        long,
        value_name = "DAYS",
        num_args = 0..=1,
        require_equals = true,
        value_parser = clap::value_parser!(u8).range(1..=16)
    )]
    forecast: Option<Option<u8>>,

    /// Read queries from stdin, one per line, sharing one cache
    #[arg(short, long)]
    interactive: bool,

    /// Alternate configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Requested forecast length, `Some(None)` meaning "configured default"
    fn forecast_days(&self) -> Option<Option<u8>> {
        self.forecast
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    if let Err(e) = clima_core::init_with_default_filter(filter) {
        eprintln!("{}", e);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let (config, _) = Config::load_validated(cli.config.as_deref())?;
    let mut service = WeatherService::from_config(&config.weather)?;

    let history = Arc::new(SearchHistory::new(HISTORY_SIZE));
    service.add_observer(history.clone());

    if cli.interactive {
        interactive(&service, &history, cli.forecast_days()).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let query = match parse_query(&cli.cities) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let ok = answer(&service, query, cli.forecast_days()).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Print the answer to one query. Returns false when nothing could be shown.
async fn answer(
    service: &WeatherService,
    query: Query,
    forecast: Option<Option<u8>>,
) -> Result<bool, AppError> {
    match query {
        Query::Single(city) => {
            let lookup = match forecast {
                Some(days) => service.lookup_forecast(&city, days).await?,
                None => service.lookup(&city).await?,
            };
            match lookup {
                Some(result) => {
                    let today = chrono::Local::now().date_naive();
                    println!("{}", render::city_weather(&result, today));
                    Ok(true)
                }
                None => {
                    println!("{}", render::not_found(&city));
                    Ok(false)
                }
            }
        }
        Query::Compare(cities) => {
            if forecast.is_some() {
                tracing::warn!("--forecast is ignored when comparing cities");
            }
            let entries = service.compare(&cities).await;
            println!("{}", render::comparison(&entries));
            Ok(!entries.is_empty())
        }
    }
}

async fn interactive(
    service: &WeatherService,
    history: &SearchHistory,
    forecast: Option<Option<u8>>,
) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Enter a city (or a comma-separated list). Commands: history, quit");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "quit" | "exit" => break,
            "history" => {
                println!("{}", render::history(&history.recent()));
                continue;
            }
            _ => {}
        }

        let query = match parse_query(&[line.as_str()]) {
            Ok(query) => query,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        // Request failures end this query, not the session.
        if let Err(e) = answer(service, query, forecast).await {
            tracing::error!("{}", e);
            println!("{}", e.user_message());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_cli_forecast_flag_forms() {
        let cli = Cli::try_parse_from(["clima", "Recife"]).unwrap();
        assert_eq!(cli.forecast_days(), None);

        let cli = Cli::try_parse_from(["clima", "Recife", "--forecast"]).unwrap();
        assert_eq!(cli.forecast_days(), Some(None));

        let cli = Cli::try_parse_from(["clima", "--forecast=7", "Recife"]).unwrap();
        assert_eq!(cli.forecast_days(), Some(Some(7)));
        assert_eq!(cli.cities, vec!["Recife"]);
    }

    #[test]
    fn test_cli_forecast_does_not_take_city_as_days() {
        let cli = Cli::try_parse_from(["clima", "--forecast", "Recife"]).unwrap();
        assert_eq!(cli.forecast_days(), Some(None));
        assert_eq!(cli.cities, vec!["Recife"]);

        let cli = Cli::try_parse_from(["clima", "-f", "Recife", "Manaus"]).unwrap();
        assert_eq!(cli.forecast_days(), Some(None));
        assert_eq!(cli.cities, vec!["Recife", "Manaus"]);

        let cli = Cli::try_parse_from(["clima", "-f=3", "Recife"]).unwrap();
        assert_eq!(cli.forecast_days(), Some(Some(3)));
        assert_eq!(cli.cities, vec!["Recife"]);
    }

    #[test]
    fn test_cli_rejects_out_of_range_forecast() {
        assert!(Cli::try_parse_from(["clima", "--forecast=0", "Recife"]).is_err());
        assert!(Cli::try_parse_from(["clima", "--forecast=17", "Recife"]).is_err());
    }

    #[test]
    fn test_cli_collects_cities() {
        let cli = Cli::try_parse_from(["clima", "São Paulo", "Recife,Manaus", "-i"]).unwrap();
        assert!(cli.interactive);
        assert_eq!(cli.cities, vec!["São Paulo", "Recife,Manaus"]);
    }
}
