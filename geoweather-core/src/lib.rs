//! Core library for the `geoweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The geocoding and weather stages and their OpenWeather clients
//! - The pipeline that runs them in sequence
//! - Shared domain models and the stage error type
//!
//! It is used by `geoweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use config::{Config, ServiceConfig};
pub use error::{OperationResult, Stage, StageError};
pub use model::{Coordinate, LocationQuery, WeatherSummary};
pub use pipeline::Pipeline;
pub use provider::{Geocoder, OpenWeatherFetcher, OpenWeatherGeocoder, WeatherFetcher};
