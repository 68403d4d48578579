use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// A resolved place. Geocoding produces it whole or not at all; there are no
/// partial results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: String,
}

/// Current conditions at a location. Temperature, description and icon are
/// the minimum an upstream payload must carry; everything else may be absent
/// and is `Option` so a missing field can never take the page down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub description: String,
    pub icon_code: String,
    pub humidity_pct: Option<u8>,
    pub pressure_hpa: Option<u16>,
    pub wind_speed_mps: Option<f64>,
    pub sunrise_utc: Option<i64>,
    pub sunset_utc: Option<i64>,
    pub timezone_offset_sec: Option<i32>,
}

impl CurrentConditions {
    /// Sunrise in the location's local time, when the payload carried both
    /// the timestamp and (optionally) a timezone offset.
    pub fn sunrise_local(&self) -> Option<DateTime<FixedOffset>> {
        local_time(self.sunrise_utc?, self.timezone_offset_sec.unwrap_or(0))
    }

    pub fn sunset_local(&self) -> Option<DateTime<FixedOffset>> {
        local_time(self.sunset_utc?, self.timezone_offset_sec.unwrap_or(0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastEntry {
    pub timestamp_unix: i64,
    pub temperature_c: f64,
    pub description: String,
    pub icon_code: String,
}

impl HourlyForecastEntry {
    pub fn local_time(&self, offset_sec: i32) -> Option<DateTime<FixedOffset>> {
        local_time(self.timestamp_unix, offset_sec)
    }
}

/// Shift a unix timestamp into the local time implied by `offset_sec`.
/// `None` for out-of-range timestamps or offsets.
pub fn local_time(timestamp: i64, offset_sec: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset_sec)?;
    Some(DateTime::<Utc>::from_timestamp(timestamp, 0)?.with_timezone(&offset))
}

/// Combined payload used by the dashboard flow: unrounded current conditions
/// plus the hourly series (chronological, possibly empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyForecastEntry>,
}

/// Pollutant concentrations in μg/m³. Any key may be missing upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub pm10: Option<f64>,
    pub pm2_5: Option<f64>,
    pub so2: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    /// Coarse categorical index as reported upstream, nominally 1-5.
    pub category_index: u8,
    pub components: Pollutants,
}
