//! Plain-text rendering of a dashboard report.
//!
//! Every optional field degrades to an omitted line or an `N/A` placeholder;
//! rendering never fails a report.

use chrono::{DateTime, FixedOffset};
use skywatch_core::{AirQualitySection, DashboardReport, Pollutants, WeatherSnapshot};

pub fn report(report: &DashboardReport) -> String {
    let mut out = String::new();
    let loc = &report.location;

    out.push_str(&format!(
        "{}, {} ({:.2}, {:.2})\n\n",
        loc.name, loc.country, loc.latitude, loc.longitude
    ));

    match &report.weather {
        Some(snapshot) => out.push_str(&weather_section(snapshot)),
        None => out.push_str(
            "Weather data could not be retrieved. Please check your API key or try again later.\n",
        ),
    }

    out.push('\n');
    match &report.air_quality {
        Some(section) => out.push_str(&air_quality_section(section)),
        None => out.push_str("Air quality data not available for this location.\n"),
    }

    if let Some(snapshot) = &report.weather {
        out.push('\n');
        out.push_str(&hourly_section(snapshot));
    }

    out
}

fn weather_section(snapshot: &WeatherSnapshot) -> String {
    let current = &snapshot.current;
    let mut out = String::new();

    out.push_str(&format!(
        "{:.1}°C - {}\n",
        current.temperature_c,
        title_case(&current.description)
    ));

    if let Some(humidity) = current.humidity_pct {
        out.push_str(&format!("Humidity: {humidity}%\n"));
    }
    if let Some(pressure) = current.pressure_hpa {
        out.push_str(&format!("Pressure: {pressure} hPa\n"));
    }
    if let Some(wind) = current.wind_speed_mps {
        out.push_str(&format!("Wind speed: {wind} m/s\n"));
    }

    // Sunrise/sunset only when the payload carried both, shown in the
    // location's local time.
    if let (Some(sunrise), Some(sunset)) = (current.sunrise_local(), current.sunset_local()) {
        out.push_str(&format!(
            "Sunrise: {}   Sunset: {}\n",
            clock(sunrise),
            clock(sunset)
        ));
    }

    out
}

fn air_quality_section(section: &AirQualitySection) -> String {
    let category = &section.estimate.category;
    let mut out = String::new();

    match section.estimate.score {
        Some(score) => out.push_str(&format!(
            "Air quality: {} {} - {}\n",
            category.icon, score, category.label
        )),
        None => out.push_str(&format!(
            "Air quality: {} {} (Level {}, Range {})\n",
            category.icon, category.label, section.reading.category_index, category.range
        )),
    }

    out.push_str(&pollutant_lines(&section.reading.components));
    out
}

fn pollutant_lines(components: &Pollutants) -> String {
    let rows = [
        ("CO", components.co),
        ("NO₂", components.no2),
        ("O₃", components.o3),
        ("PM10", components.pm10),
        ("PM2.5", components.pm2_5),
        ("SO₂", components.so2),
    ];

    rows.iter()
        .map(|(name, value)| match value {
            Some(value) => format!("  {name}: {value} μg/m³\n"),
            None => format!("  {name}: N/A\n"),
        })
        .collect()
}

fn hourly_section(snapshot: &WeatherSnapshot) -> String {
    if snapshot.hourly.is_empty() {
        return "Hourly forecast not available.\n".to_string();
    }

    let offset = snapshot.current.timezone_offset_sec.unwrap_or(0);
    let mut out = String::from("Hourly forecast:\n");

    for entry in &snapshot.hourly {
        let time = entry
            .local_time(offset)
            .map(hour)
            .unwrap_or_else(|| "??".to_string());
        out.push_str(&format!(
            "  {time}  {:.1}°C  {}\n",
            entry.temperature_c,
            title_case(&entry.description)
        ));
    }

    out
}

fn clock(time: DateTime<FixedOffset>) -> String {
    time.format("%I:%M %p").to_string()
}

fn hour(time: DateTime<FixedOffset>) -> String {
    time.format("%I %p").to_string()
}

/// "clear sky" -> "Clear Sky", the way the upstream descriptions are shown.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use skywatch_core::{
        AirQualityReading, CurrentConditions, HourlyForecastEntry, Location, aqi,
    };

    fn tokyo_report() -> DashboardReport {
        let reading = AirQualityReading {
            category_index: 2,
            components: Pollutants {
                co: Some(201.9),
                pm2_5: Some(10.0),
                ..Pollutants::default()
            },
        };

        DashboardReport {
            location: Location {
                latitude: 35.68,
                longitude: 139.69,
                name: "Tokyo".to_string(),
                country: "JP".to_string(),
            },
            weather: Some(WeatherSnapshot {
                current: CurrentConditions {
                    temperature_c: 22.5,
                    description: "clear sky".to_string(),
                    icon_code: "01d".to_string(),
                    humidity_pct: Some(64),
                    pressure_hpa: Some(1012),
                    wind_speed_mps: None,
                    sunrise_utc: Some(0),
                    sunset_utc: Some(12 * 3600),
                    timezone_offset_sec: Some(0),
                },
                hourly: vec![HourlyForecastEntry {
                    timestamp_unix: 15 * 3600,
                    temperature_c: 21.9,
                    description: "few clouds".to_string(),
                    icon_code: "02d".to_string(),
                }],
            }),
            air_quality: Some(AirQualitySection {
                estimate: aqi::estimate(reading.components.pm2_5, reading.category_index),
                reading,
            }),
        }
    }

    #[test]
    fn full_report_renders_every_section() {
        let rendered = report(&tokyo_report());

        assert!(rendered.contains("Tokyo, JP (35.68, 139.69)"));
        assert!(rendered.contains("22.5°C - Clear Sky"));
        assert!(rendered.contains("Humidity: 64%"));
        assert!(rendered.contains("Pressure: 1012 hPa"));
        assert!(rendered.contains("Sunrise: 12:00 AM   Sunset: 12:00 PM"));
        assert!(rendered.contains("Air quality: 🟡 41 - Fair"));
        assert!(rendered.contains("  CO: 201.9 μg/m³"));
        assert!(rendered.contains("  PM2.5: 10 μg/m³"));
        assert!(rendered.contains("  O₃: N/A"));
        assert!(rendered.contains("  03 PM  21.9°C  Few Clouds"));
    }

    #[test]
    fn missing_wind_omits_the_line() {
        let rendered = report(&tokyo_report());
        assert!(!rendered.contains("Wind speed"));
    }

    #[test]
    fn categorical_fallback_when_no_score() {
        let mut dashboard = tokyo_report();
        if let Some(section) = dashboard.air_quality.as_mut() {
            section.reading.components.pm2_5 = None;
            section.estimate = aqi::estimate(None, 2);
        }

        let rendered = report(&dashboard);
        assert!(rendered.contains("Air quality: 🟡 Fair (Level 2, Range 51-100)"));
        assert!(!rendered.contains(" 41 - "));
    }

    #[test]
    fn missing_sections_show_placeholders() {
        let mut dashboard = tokyo_report();
        dashboard.weather = None;
        dashboard.air_quality = None;

        let rendered = report(&dashboard);
        assert!(rendered.contains("Weather data could not be retrieved"));
        assert!(rendered.contains("Air quality data not available"));
        assert!(!rendered.contains("Hourly forecast"));
    }

    #[test]
    fn empty_hourly_series_shows_notice() {
        let mut dashboard = tokyo_report();
        if let Some(snapshot) = dashboard.weather.as_mut() {
            snapshot.hourly.clear();
        }

        let rendered = report(&dashboard);
        assert!(rendered.contains("Hourly forecast not available."));
    }

    #[test]
    fn title_case_matches_display_convention() {
        assert_eq!(title_case("clear sky"), "Clear Sky");
        assert_eq!(title_case("overcast CLOUDS"), "Overcast Clouds");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn unknown_category_renders_na_range() {
        let mut dashboard = tokyo_report();
        if let Some(section) = dashboard.air_quality.as_mut() {
            section.reading.category_index = 9;
            section.reading.components.pm2_5 = None;
            section.estimate = aqi::estimate(None, 9);
        }

        let rendered = report(&dashboard);
        assert!(rendered.contains("Air quality: ⚪ Unknown (Level 9, Range N/A)"));
    }
}
