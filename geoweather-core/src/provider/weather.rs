use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    OperationResult, ServiceConfig, StageError, WeatherSummary, error::Stage, http::get_json,
};

use super::WeatherFetcher;

/// Client for the OpenWeather current-weather endpoint, always in metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherFetcher {
    pub fn new(config: &ServiceConfig, http: Client) -> Self {
        Self { url: config.weather_url.clone(), api_key: config.api_key.clone(), http }
    }
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
}

impl OwCurrentResponse {
    fn into_summary(self) -> OperationResult<WeatherSummary> {
        let description = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| StageError::parse(Stage::Weather, "missing field `weather[0]`"))?;

        Ok(WeatherSummary {
            city: self.name,
            country: self.sys.country,
            temperature_c: self.main.temp,
            description,
        })
    }
}

/// Extract a [`WeatherSummary`] from a raw current-weather payload.
///
/// Either every field is present or the result is an error.
pub fn parse_weather(payload: Value) -> OperationResult<WeatherSummary> {
    serde_json::from_value::<OwCurrentResponse>(payload)
        .map_err(|e| StageError::parse(Stage::Weather, e.to_string()))?
        .into_summary()
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn fetch(&self, latitude: f64, longitude: f64) -> OperationResult<WeatherSummary> {
        debug!(latitude, longitude, "fetching current weather");

        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let payload: Value = get_json(
            &self.http,
            Stage::Weather,
            &self.url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ],
        )
        .await?;

        let summary = parse_weather(payload)?;
        info!(city = %summary.city, country = %summary.country, "fetched current weather");

        Ok(summary)
    }
}
