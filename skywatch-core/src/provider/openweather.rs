use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::model::{
    AirQualityReading, CurrentConditions, HourlyForecastEntry, Location, Pollutants,
    WeatherSnapshot,
};

use super::{FetchError, WeatherProvider};

const DEFAULT_GEO_BASE: &str = "http://api.openweathermap.org";
const DEFAULT_DATA_BASE: &str = "https://api.openweathermap.org";

/// Client for the three OpenWeather endpoints the dashboard consumes:
/// direct geocoding, current weather and air pollution.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    geocoding_url: String,
    weather_url: String,
    air_pollution_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            geocoding_url: format!("{DEFAULT_GEO_BASE}/geo/1.0/direct"),
            weather_url: format!("{DEFAULT_DATA_BASE}/data/2.5/weather"),
            air_pollution_url: format!("{DEFAULT_DATA_BASE}/data/2.5/air_pollution"),
        }
    }

    /// Point every endpoint at `base`; used by tests to talk to a local
    /// mock server instead of openweathermap.org.
    pub fn with_base_url(api_key: String, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            api_key,
            http: Client::new(),
            geocoding_url: format!("{base}/geo/1.0/direct"),
            weather_url: format!("{base}/data/2.5/weather"),
            air_pollution_url: format!("{base}/data/2.5/air_pollution"),
        }
    }

    /// Shared GET helper: sends the request, reads the body, and turns a
    /// non-2xx status into a `FetchError::Status` carrying a truncated body.
    async fn get_body(
        &self,
        url: &str,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<String> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({endpoint})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {endpoint} response body"))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            }
            .into());
        }

        Ok(body)
    }

    async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<OwWeatherResponse> {
        let body = self
            .get_body(
                &self.weather_url,
                "current weather",
                &[
                    ("lat", lat.to_string().as_str()),
                    ("lon", lon.to_string().as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
            )
            .await?;

        serde_json::from_str(&body).context("Failed to parse OpenWeather current weather JSON")
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn geocode(&self, city: &str) -> Result<Option<Location>> {
        let body = self
            .get_body(
                &self.geocoding_url,
                "geocoding",
                &[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())],
            )
            .await?;

        // A body that is not the expected array shape counts as zero
        // matches: the caller sees "no such city", not an error.
        let matches: Vec<OwGeoMatch> = match serde_json::from_str(&body) {
            Ok(matches) => matches,
            Err(err) => {
                warn!("unexpected geocoding payload for '{city}': {err}");
                return Ok(None);
            }
        };

        Ok(matches.into_iter().next().map(|m| Location {
            latitude: m.lat,
            longitude: m.lon,
            name: m.name,
            country: m.country,
        }))
    }

    async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot> {
        let parsed = self.fetch_weather(lat, lon).await?;

        let hourly = parsed
            .hourly
            .iter()
            .filter_map(OwHourlyEntry::to_forecast_entry)
            .collect();

        Ok(WeatherSnapshot {
            current: parsed.into_conditions()?,
            hourly,
        })
    }

    async fn quick_current(&self, lat: f64, lon: f64) -> Result<Option<CurrentConditions>> {
        let conditions = match self.fetch_weather(lat, lon).await {
            Ok(parsed) => parsed.into_conditions(),
            Err(err) => {
                warn!("quick current weather fetch failed: {err:#}");
                return Ok(None);
            }
        };

        match conditions {
            Ok(mut current) => {
                current.temperature_c = current.temperature_c.round();
                Ok(Some(current))
            }
            Err(err) => {
                warn!("quick current weather payload unusable: {err:#}");
                Ok(None)
            }
        }
    }

    async fn air_quality(&self, lat: f64, lon: f64) -> Result<AirQualityReading> {
        let body = self
            .get_body(
                &self.air_pollution_url,
                "air pollution",
                &[
                    ("lat", lat.to_string().as_str()),
                    ("lon", lon.to_string().as_str()),
                    ("appid", self.api_key.as_str()),
                ],
            )
            .await?;

        let parsed: OwAirResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather air pollution JSON")?;

        let entry = parsed.list.into_iter().next().ok_or(FetchError::MissingField {
            endpoint: "air pollution",
            field: "list[0]",
        })?;

        Ok(AirQualityReading {
            category_index: entry.main.aqi,
            components: entry.components,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoMatch {
    lat: f64,
    lon: f64,
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: Option<u8>,
    pressure: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwWeatherResponse {
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwCondition>,
    wind: Option<OwWind>,
    sys: Option<OwSys>,
    timezone: Option<i32>,
    #[serde(default)]
    hourly: Vec<OwHourlyEntry>,
}

impl OwWeatherResponse {
    /// Extract `CurrentConditions`, requiring `main.temp` and `weather[0]`
    /// but tolerating the absence of everything else.
    fn into_conditions(self) -> Result<CurrentConditions> {
        let main = self.main.ok_or(FetchError::MissingField {
            endpoint: "current weather",
            field: "main",
        })?;

        let condition = self.weather.into_iter().next().ok_or(FetchError::MissingField {
            endpoint: "current weather",
            field: "weather[0]",
        })?;

        Ok(CurrentConditions {
            temperature_c: main.temp,
            description: condition.description,
            icon_code: condition.icon,
            humidity_pct: main.humidity,
            pressure_hpa: main.pressure,
            wind_speed_mps: self.wind.and_then(|w| w.speed),
            sunrise_utc: self.sys.as_ref().and_then(|s| s.sunrise),
            sunset_utc: self.sys.as_ref().and_then(|s| s.sunset),
            timezone_offset_sec: self.timezone,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwHourlyEntry {
    dt: i64,
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

impl OwHourlyEntry {
    /// Entries missing temperature or condition are skipped, not fatal.
    fn to_forecast_entry(&self) -> Option<HourlyForecastEntry> {
        let main = self.main.as_ref()?;
        let condition = self.weather.first()?;

        Some(HourlyForecastEntry {
            timestamp_unix: self.dt,
            temperature_c: main.temp,
            description: condition.description.clone(),
            icon_code: condition.icon.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwAirResponse {
    #[serde(default)]
    list: Vec<OwAirEntry>,
}

#[derive(Debug, Deserialize)]
struct OwAirEntry {
    main: OwAirMain,
    #[serde(default)]
    components: Pollutants,
}

#[derive(Debug, Deserialize)]
struct OwAirMain {
    aqi: u8,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
