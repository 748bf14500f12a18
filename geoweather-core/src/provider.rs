//! The two stages of the lookup and their OpenWeather implementations.
//!
//! Both stages report failure as a [`StageError`](crate::StageError) value;
//! nothing is raised past a stage.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Coordinate, LocationQuery, OperationResult, WeatherSummary};

pub mod geocoder;
pub mod weather;

pub use geocoder::OpenWeatherGeocoder;
pub use weather::{OpenWeatherFetcher, parse_weather};

/// Turns a location descriptor into the best-matching coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, query: &LocationQuery) -> OperationResult<Coordinate>;
}

/// Turns a coordinate into current conditions.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, latitude: f64, longitude: f64) -> OperationResult<WeatherSummary>;
}
