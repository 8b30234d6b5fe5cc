//! CLI and configuration surface.
//!
//! The weather API credential is never compiled in: it must arrive through
//! `--api-key` or the `OPENWEATHER_API_KEY` environment variable. Endpoint
//! URLs are overridable, which is also what the HTTP tests lean on.

use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_CITIES_URL: &str = "https://public.opendatasoft.com/api/explore/v2.1/catalog/datasets/geonames-all-cities-with-a-population-1000/records";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// City directory with weather lookups.
#[derive(Parser, Debug, Clone)]
#[command(name = "cityscope", version, about)]
pub struct Config {
    /// OpenWeatherMap API key.
    #[arg(long, env = "OPENWEATHER_API_KEY")]
    pub api_key: String,

    /// City directory endpoint.
    #[arg(long, default_value = DEFAULT_CITIES_URL)]
    pub cities_url: String,

    /// Current-conditions endpoint.
    #[arg(long, default_value = DEFAULT_WEATHER_URL)]
    pub weather_url: String,

    /// Forecast endpoint.
    #[arg(long, default_value = DEFAULT_FORECAST_URL)]
    pub forecast_url: String,

    /// Append diagnostics to this file (filtered via RUST_LOG).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_flag_and_default_urls() {
        let config = Config::try_parse_from(["cityscope", "--api-key", "k123"]).expect("parse");
        assert_eq!(config.api_key, "k123");
        assert_eq!(config.cities_url, DEFAULT_CITIES_URL);
        assert_eq!(config.weather_url, DEFAULT_WEATHER_URL);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn urls_are_overridable() {
        let config = Config::try_parse_from([
            "cityscope",
            "--api-key",
            "k123",
            "--cities-url",
            "http://localhost:9999/records",
        ])
        .expect("parse");
        assert_eq!(config.cities_url, "http://localhost:9999/records");
    }
}
