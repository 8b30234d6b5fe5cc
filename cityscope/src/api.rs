//! HTTP clients for the two upstream services.
//!
//! One shared `reqwest::Client` with a timeout, three GET endpoints. Wire
//! shapes are decoded into the domain types in [`crate::state`]; callers
//! (the effect handler tasks) map errors onto `Did*Error` actions and log
//! them there.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::state::{City, CurrentConditions, ForecastEntry, PAGE_SIZE};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Failure taxonomy shared by every fetch: transport, non-success status,
/// or a payload that does not decode. All are handled identically.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One page of the city directory.
#[derive(Debug, Deserialize)]
pub struct CityPage {
    pub total_count: u64,
    pub results: Vec<City>,
}

// ===== OpenWeatherMap wire shapes =====

#[derive(Debug, Deserialize)]
struct ConditionTag {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWire {
    main: CurrentReadings,
    weather: Vec<ConditionTag>,
}

#[derive(Debug, Deserialize)]
struct CurrentReadings {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ForecastWire {
    list: Vec<ForecastStepWire>,
}

#[derive(Debug, Deserialize)]
struct ForecastStepWire {
    dt_txt: String,
    main: ForecastReadings,
    weather: Vec<ConditionTag>,
}

#[derive(Debug, Deserialize)]
struct ForecastReadings {
    temp: f64,
    feels_like: f64,
}

fn current_from_wire(wire: CurrentWire) -> CurrentConditions {
    let (condition, description) = wire
        .weather
        .into_iter()
        .next()
        .map(|tag| (tag.main, tag.description))
        .unwrap_or_default();
    CurrentConditions {
        temp_c: wire.main.temp,
        feels_like_c: wire.main.feels_like,
        temp_min_c: wire.main.temp_min,
        temp_max_c: wire.main.temp_max,
        humidity: wire.main.humidity,
        condition,
        description,
    }
}

fn forecast_from_wire(wire: ForecastWire) -> Vec<ForecastEntry> {
    wire.list
        .into_iter()
        .map(|step| {
            let description = step
                .weather
                .into_iter()
                .next()
                .map(|tag| tag.description)
                .unwrap_or_default();
            ForecastEntry {
                timestamp: step.dt_txt,
                temp_c: step.main.temp,
                feels_like_c: step.main.feels_like,
                description,
            }
        })
        .collect()
}

/// Shared client over both upstream services. No `Debug` derive: the
/// struct carries the API credential.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    cities_url: String,
    weather_url: String,
    forecast_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            cities_url: config.cities_url.clone(),
            weather_url: config.weather_url.clone(),
            forecast_url: config.forecast_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch one directory page (fixed page size, 1-based page number).
    pub async fn fetch_cities_page(&self, page: u32) -> Result<CityPage, ApiError> {
        let url = format!("{}?limit={}&page={}", self.cities_url, PAGE_SIZE, page);
        self.get_json(&url).await
    }

    /// Fetch current conditions for a city, metric units.
    pub async fn fetch_current_weather(&self, city: &str) -> Result<CurrentConditions, ApiError> {
        let url = format!(
            "{}?q={}&appid={}&units=metric",
            self.weather_url,
            urlencoding::encode(city),
            self.api_key
        );
        let wire: CurrentWire = self.get_json(&url).await?;
        Ok(current_from_wire(wire))
    }

    /// Fetch the 5-day/3-hour forecast for a city, metric units.
    pub async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, ApiError> {
        let url = format!(
            "{}?q={}&appid={}&units=metric",
            self.forecast_url,
            urlencoding::encode(city),
            self.api_key
        );
        let wire: ForecastWire = self.get_json(&url).await?;
        Ok(forecast_from_wire(wire))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CITY_PAGE_JSON: &str = r#"{
        "total_count": 100,
        "results": [
            {
                "geoname_id": "2643743",
                "name": "London",
                "ascii_name": "London",
                "country_code": "GB",
                "timezone": "Europe/London"
            },
            {
                "geoname_id": "2988507",
                "name": "Paris",
                "ascii_name": "Paris",
                "country_code": "FR",
                "timezone": "Europe/Paris"
            }
        ]
    }"#;

    const CURRENT_JSON: &str = r#"{
        "main": {
            "temp": 17.3,
            "feels_like": 16.8,
            "temp_min": 15.0,
            "temp_max": 19.2,
            "humidity": 72
        },
        "weather": [
            { "main": "Rain", "description": "light rain" }
        ]
    }"#;

    const FORECAST_JSON: &str = r#"{
        "list": [
            {
                "dt_txt": "2026-08-07 12:00:00",
                "main": { "temp": 18.1, "feels_like": 17.5 },
                "weather": [ { "main": "Clouds", "description": "broken clouds" } ]
            },
            {
                "dt_txt": "2026-08-07 15:00:00",
                "main": { "temp": 19.4, "feels_like": 19.0 },
                "weather": [ { "main": "Clear", "description": "clear sky" } ]
            }
        ]
    }"#;

    fn test_config(base: &str) -> Config {
        Config {
            api_key: "test-key".into(),
            cities_url: format!("{base}/records"),
            weather_url: format!("{base}/weather"),
            forecast_url: format!("{base}/forecast"),
            log_file: None,
        }
    }

    #[test]
    fn city_page_decodes() {
        let page: CityPage = serde_json::from_str(CITY_PAGE_JSON).expect("decode");
        assert_eq!(page.total_count, 100);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].name, "London");
        assert_eq!(page.results[1].country_code, "FR");
    }

    #[test]
    fn current_wire_maps_to_domain() {
        let wire: CurrentWire = serde_json::from_str(CURRENT_JSON).expect("decode");
        let current = current_from_wire(wire);
        assert_eq!(current.temp_c, 17.3);
        assert_eq!(current.humidity, 72);
        assert_eq!(current.condition, "Rain");
        assert_eq!(current.description, "light rain");
    }

    #[test]
    fn forecast_wire_maps_in_order() {
        let wire: ForecastWire = serde_json::from_str(FORECAST_JSON).expect("decode");
        let entries = forecast_from_wire(wire);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].timestamp, "2026-08-07 12:00:00");
        assert_eq!(entries[0].description, "broken clouds");
        assert_eq!(entries[1].temp_c, 19.4);
    }

    #[test]
    fn missing_condition_tag_yields_empty_strings() {
        let json = r#"{
            "main": { "temp": 1.0, "feels_like": 0.5, "temp_min": 0.0, "temp_max": 2.0, "humidity": 90 },
            "weather": []
        }"#;
        let wire: CurrentWire = serde_json::from_str(json).expect("decode");
        let current = current_from_wire(wire);
        assert!(current.condition.is_empty());
        assert!(current.description.is_empty());
    }

    #[tokio::test]
    async fn fetch_cities_page_sends_limit_and_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/records"))
            .and(query_param("limit", "20"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(CITY_PAGE_JSON, "application/json"))
            .mount(&server)
            .await;

        let api = ApiClient::new(&test_config(&server.uri())).expect("client");
        let page = api.fetch_cities_page(3).await.expect("fetch");
        assert_eq!(page.total_count, 100);
        assert_eq!(page.results.len(), 2);
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/records"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = ApiClient::new(&test_config(&server.uri())).expect("client");
        let err = api.fetch_cities_page(1).await.expect_err("should fail");
        assert!(matches!(err, ApiError::Status(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/records"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
            .mount(&server)
            .await;

        let api = ApiClient::new(&test_config(&server.uri())).expect("client");
        let err = api.fetch_cities_page(1).await.expect_err("should fail");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn weather_request_carries_city_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "East London"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(CURRENT_JSON, "application/json"))
            .mount(&server)
            .await;

        let api = ApiClient::new(&test_config(&server.uri())).expect("client");
        let current = api.fetch_current_weather("East London").await.expect("fetch");
        assert_eq!(current.condition, "Rain");
    }

    #[tokio::test]
    async fn forecast_round_trips() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(FORECAST_JSON, "application/json"))
            .mount(&server)
            .await;

        let api = ApiClient::new(&test_config(&server.uri())).expect("client");
        let entries = api.fetch_forecast("Paris").await.expect("fetch");
        assert_eq!(entries.len(), 2);
    }
}
