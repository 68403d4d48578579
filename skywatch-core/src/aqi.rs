//! PM2.5-based AQI estimation.
//!
//! OpenWeather only reports a coarse 1-5 category. When a PM2.5
//! concentration is available, a finer 0-500 score is derived from it using
//! the EPA breakpoint table; otherwise display falls back to the category.

/// Label, icon and nominal score range for one coarse air-quality category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiCategory {
    pub label: &'static str,
    pub icon: &'static str,
    pub range: &'static str,
}

/// Outcome of the estimation. `score` is present only when a PM2.5
/// concentration was; the category is always usable for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatedAqi {
    pub score: Option<u16>,
    pub category: AqiCategory,
}

/// Map the upstream 1-5 index to its fixed display triple. Anything outside
/// that range is reported as unknown rather than rejected.
pub fn category(index: u8) -> AqiCategory {
    let (label, icon, range) = match index {
        1 => ("Good", "🟢", "0-50"),
        2 => ("Fair", "🟡", "51-100"),
        3 => ("Moderate", "🟠", "101-150"),
        4 => ("Poor", "🔴", "151-200"),
        5 => ("Very Poor", "🟣", "201-300+"),
        _ => ("Unknown", "⚪", "N/A"),
    };

    AqiCategory { label, icon, range }
}

/// Piecewise-linear interpolation from PM2.5 (μg/m³) to a 0-500 score per
/// EPA breakpoints. The result is truncated, not rounded, on every segment
/// and clamped to 500 above 350.4 μg/m³.
pub fn estimate_score(pm2_5: f64) -> u16 {
    let raw = if pm2_5 <= 12.0 {
        50.0 * pm2_5 / 12.0
    } else if pm2_5 <= 35.4 {
        50.0 + 50.0 * (pm2_5 - 12.0) / (35.4 - 12.0)
    } else if pm2_5 <= 55.4 {
        100.0 + 50.0 * (pm2_5 - 35.4) / (55.4 - 35.4)
    } else if pm2_5 <= 150.4 {
        150.0 + 50.0 * (pm2_5 - 55.4) / (150.4 - 55.4)
    } else if pm2_5 <= 250.4 {
        200.0 + 100.0 * (pm2_5 - 150.4) / (250.4 - 150.4)
    } else {
        300.0 + 200.0 * (pm2_5 - 250.4) / (350.4 - 250.4)
    };

    (raw as u16).min(500)
}

/// Derive the display AQI from an optional PM2.5 concentration and the
/// upstream category index.
pub fn estimate(pm2_5: Option<f64>, category_index: u8) -> EstimatedAqi {
    EstimatedAqi {
        score: pm2_5.map(estimate_score),
        category: category(category_index),
    }
}
