use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    Coordinate, LocationQuery, OperationResult, ServiceConfig, StageError,
    error::Stage,
    http::get_json,
};

use super::Geocoder;

/// Client for the OpenWeather direct geocoding endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherGeocoder {
    url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherGeocoder {
    pub fn new(config: &ServiceConfig, http: Client) -> Self {
        Self { url: config.geo_url.clone(), api_key: config.api_key.clone(), http }
    }
}

/// One candidate of the geocoding answer. Only `lat`/`lon` are required.
#[derive(Debug, Deserialize)]
struct GeoCandidate {
    lat: f64,
    lon: f64,
    name: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

#[async_trait]
impl Geocoder for OpenWeatherGeocoder {
    async fn resolve(&self, query: &LocationQuery) -> OperationResult<Coordinate> {
        let q = query.query_string();
        debug!(q = %q, "geocoding location");

        let candidates: Vec<GeoCandidate> = get_json(
            &self.http,
            Stage::Geocoding,
            &self.url,
            &[("q", q.as_str()), ("limit", "1"), ("appid", self.api_key.as_str())],
        )
        .await?;

        let best = candidates.into_iter().next().ok_or(StageError::NotFound)?;

        info!(
            name = best.name.as_deref().unwrap_or("?"),
            state = best.state.as_deref().unwrap_or(""),
            country = best.country.as_deref().unwrap_or(""),
            lat = best.lat,
            lon = best.lon,
            "resolved location"
        );

        Ok(Coordinate { latitude: best.lat, longitude: best.lon })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_needs_only_lat_lon() {
        let c: GeoCandidate =
            serde_json::from_value(serde_json::json!({"lat": 51.5, "lon": -0.12})).expect("valid");
        assert_eq!((c.lat, c.lon), (51.5, -0.12));
        assert!(c.name.is_none());
    }

    #[test]
    fn candidate_without_lon_is_rejected() {
        let res: Result<GeoCandidate, _> =
            serde_json::from_value(serde_json::json!({"lat": 51.5, "name": "London"}));
        assert!(res.is_err());
    }

    #[test]
    fn takes_its_urls_from_config() {
        let mut cfg = ServiceConfig::new("KEY");
        cfg.geo_url = "http://localhost:9/geo".into();

        let geocoder = OpenWeatherGeocoder::new(&cfg, Client::new());
        assert_eq!(geocoder.url, "http://localhost:9/geo");
        assert_eq!(geocoder.api_key, "KEY");
    }
}
