//! The per-request dashboard pass: resolve coordinates, fetch weather, fetch
//! air quality, estimate the AQI. One strictly sequential pass per search;
//! nothing is retried or cached.

use anyhow::Result;
use tracing::{debug, warn};

use crate::aqi::{self, EstimatedAqi};
use crate::model::{AirQualityReading, Location, WeatherSnapshot};
use crate::provider::WeatherProvider;

/// Only the first entries of the hourly series are kept for display.
pub const HOURLY_DISPLAY_LIMIT: usize = 8;

#[derive(Debug, Clone)]
pub struct AirQualitySection {
    pub reading: AirQualityReading,
    pub estimate: EstimatedAqi,
}

/// Everything one search produced. Either section may be `None` when its
/// fetch failed; the rest of the report still renders.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub location: Location,
    pub weather: Option<WeatherSnapshot>,
    pub air_quality: Option<AirQualitySection>,
}

#[derive(Debug, Clone)]
pub enum DashboardOutcome {
    /// Geocoding found nothing (or the query was empty). Expected, not an
    /// error; no weather or air-quality call is made.
    CityNotFound,
    Report(DashboardReport),
}

/// Run one dashboard pass for `city`.
///
/// Geocoding failures at the transport level propagate as errors; a city
/// that simply doesn't resolve short-circuits to `CityNotFound`. Weather and
/// air-quality fetches degrade independently: a failure there logs a warning
/// and blanks that section instead of aborting the report.
pub async fn run(provider: &dyn WeatherProvider, city: &str) -> Result<DashboardOutcome> {
    let city = city.trim();
    if city.is_empty() {
        return Ok(DashboardOutcome::CityNotFound);
    }

    let Some(location) = provider.geocode(city).await? else {
        return Ok(DashboardOutcome::CityNotFound);
    };

    debug!(
        "resolved '{city}' to {}, {} ({}, {})",
        location.name, location.country, location.latitude, location.longitude
    );

    let weather = match provider
        .current_weather(location.latitude, location.longitude)
        .await
    {
        Ok(mut snapshot) => {
            snapshot.hourly.truncate(HOURLY_DISPLAY_LIMIT);
            Some(snapshot)
        }
        Err(err) => {
            warn!("current weather unavailable for {}: {err:#}", location.name);
            None
        }
    };

    let air_quality = match provider
        .air_quality(location.latitude, location.longitude)
        .await
    {
        Ok(reading) => Some(AirQualitySection {
            estimate: aqi::estimate(reading.components.pm2_5, reading.category_index),
            reading,
        }),
        Err(err) => {
            warn!("air quality unavailable for {}: {err:#}", location.name);
            None
        }
    };

    Ok(DashboardOutcome::Report(DashboardReport {
        location,
        weather,
        air_quality,
    }))
}
