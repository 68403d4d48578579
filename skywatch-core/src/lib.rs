//! Core library for the `skywatch` dashboard CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client (geocoding, current weather, air quality)
//! - PM2.5-based AQI estimation
//! - The per-request dashboard pass tying them together
//!
//! It is used by `skywatch-cli`, but can also be reused by other binaries or services.

pub mod aqi;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod provider;

pub use aqi::{AqiCategory, EstimatedAqi};
pub use config::Config;
pub use dashboard::{AirQualitySection, DashboardOutcome, DashboardReport};
pub use model::{
    AirQualityReading, CurrentConditions, HourlyForecastEntry, Location, Pollutants,
    WeatherSnapshot,
};
pub use provider::{FetchError, OpenWeatherClient, WeatherProvider};
