use crate::model::{AirQualityReading, CurrentConditions, Location, WeatherSnapshot};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Typed failure modes of the upstream APIs, so callers can tell "upstream
/// rejected the request" from "payload was malformed" from a plain transport
/// error (which stays a bare `anyhow` error).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("OpenWeather {endpoint} response is missing required field `{field}`")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },
}

/// Seam over the upstream weather service. The dashboard flow only talks to
/// this trait, which keeps it testable without a network.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a free-text city name to its single best match.
    ///
    /// `Ok(None)` is the expected "no such city" outcome, returned both for
    /// an empty result set and for a malformed body; transport and HTTP
    /// failures are errors.
    async fn geocode(&self, city: &str) -> anyhow::Result<Option<Location>>;

    /// Current conditions plus the hourly series, temperature unrounded.
    async fn current_weather(&self, lat: f64, lon: f64) -> anyhow::Result<WeatherSnapshot>;

    /// Simplified standalone fetch: temperature rounded to the nearest whole
    /// degree, and any failure is logged and surfaces as `Ok(None)` instead
    /// of an error. Deliberately not unified with `current_weather`; the two
    /// rounding behaviors are distinct contracts (see DESIGN.md).
    async fn quick_current(&self, lat: f64, lon: f64)
    -> anyhow::Result<Option<CurrentConditions>>;

    /// Pollutant concentrations and the coarse 1-5 category.
    async fn air_quality(&self, lat: f64, lon: f64) -> anyhow::Result<AirQualityReading>;
}
