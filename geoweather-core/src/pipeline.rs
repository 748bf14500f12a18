use anyhow::Result;
use tracing::warn;

use crate::{
    LocationQuery, OperationResult, ServiceConfig, WeatherSummary,
    http::build_client,
    provider::{Geocoder, OpenWeatherFetcher, OpenWeatherGeocoder, WeatherFetcher},
};

/// Geocode, then fetch weather for the resulting coordinate.
#[derive(Debug)]
pub struct Pipeline<G, W> {
    geocoder: G,
    fetcher: W,
}

impl Pipeline<OpenWeatherGeocoder, OpenWeatherFetcher> {
    /// Wire both OpenWeather stages onto one HTTP client.
    pub fn openweather(config: &ServiceConfig) -> Result<Self> {
        let http = build_client(config.timeout)?;

        Ok(Self::new(
            OpenWeatherGeocoder::new(config, http.clone()),
            OpenWeatherFetcher::new(config, http),
        ))
    }
}

impl<G: Geocoder, W: WeatherFetcher> Pipeline<G, W> {
    pub fn new(geocoder: G, fetcher: W) -> Self {
        Self { geocoder, fetcher }
    }

    /// The fetcher is only called once the geocoder succeeded.
    pub async fn run(&self, query: &LocationQuery) -> OperationResult<WeatherSummary> {
        let coord = self.geocoder.resolve(query).await.inspect_err(|e| {
            warn!(stage = %e.stage(), error = %e, "geocoding failed");
        })?;

        self.fetcher
            .fetch(coord.latitude, coord.longitude)
            .await
            .inspect_err(|e| warn!(stage = %e.stage(), error = %e, "weather lookup failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, StageError, error::Stage};
    use async_trait::async_trait;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug)]
    struct FixedGeocoder(fn() -> OperationResult<Coordinate>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, _query: &LocationQuery) -> OperationResult<Coordinate> {
            (self.0)()
        }
    }

    #[derive(Debug, Default)]
    struct RecordingFetcher {
        calls: AtomicUsize,
        seen: Mutex<Option<(f64, f64)>>,
    }

    #[async_trait]
    impl WeatherFetcher for RecordingFetcher {
        async fn fetch(&self, latitude: f64, longitude: f64) -> OperationResult<WeatherSummary> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = Some((latitude, longitude));
            Ok(WeatherSummary {
                city: "Paris".into(),
                country: "FR".into(),
                temperature_c: 18.5,
                description: "clear sky".into(),
            })
        }
    }

    fn london() -> LocationQuery {
        LocationQuery::new("London", "", "GB")
    }

    #[tokio::test]
    async fn passes_coordinate_to_fetcher() {
        let pipeline = Pipeline::new(
            FixedGeocoder(|| Ok(Coordinate { latitude: 51.5, longitude: -0.12 })),
            RecordingFetcher::default(),
        );

        let summary = pipeline.run(&london()).await.expect("both stages succeed");

        assert_eq!(summary.city, "Paris");
        assert_eq!(*pipeline.fetcher.seen.lock().unwrap(), Some((51.5, -0.12)));
    }

    #[tokio::test]
    async fn geocoder_failure_skips_fetcher() {
        let pipeline =
            Pipeline::new(FixedGeocoder(|| Err(StageError::NotFound)), RecordingFetcher::default());

        let err = pipeline.run(&london()).await.unwrap_err();

        assert_eq!(err, StageError::NotFound);
        assert_eq!(pipeline.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn geocoder_status_error_is_returned_as_is() {
        let pipeline = Pipeline::new(
            FixedGeocoder(|| Err(StageError::Status { stage: Stage::Geocoding, status: 500 })),
            RecordingFetcher::default(),
        );

        let err = pipeline.run(&london()).await.unwrap_err();

        assert!(err.to_string().contains("500"));
        assert_eq!(pipeline.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn openweather_pipeline_builds_from_config() {
        assert!(Pipeline::openweather(&ServiceConfig::new("KEY")).is_ok());
    }
}
