//! Pure presentation helpers for the weather screens.
//!
//! Everything here is a deterministic function over primitive inputs: no
//! I/O, no hidden state. Frontends combine these with a
//! [`crate::WeatherSnapshot`] to build their display strings.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use chrono::format::Locale;

/// Locale used by the app's screens for weekday names.
pub const DEFAULT_LOCALE: Locale = Locale::it_IT;

/// Description and icon identifier for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCodeInfo {
    pub description: &'static str,
    pub icon: &'static str,
}

/// Entry returned for any code missing from the WMO table.
const UNKNOWN_CODE: WeatherCodeInfo = WeatherCodeInfo {
    description: "Unknown",
    icon: "question-mark-circle",
};

/// Look up description and icon for a WMO weather interpretation code.
///
/// Exact integer keys only: a code outside the table maps to the fixed
/// unknown entry, never to a neighbouring range.
pub fn describe_weather_code(code: i32) -> WeatherCodeInfo {
    let (description, icon) = match code {
        0 => ("Sereno", "sun"),
        1 => ("Principalmente sereno", "sun"),
        2 => ("Parzialmente nuvoloso", "cloud-sun"),
        3 => ("Nuvoloso", "cloud"),
        45 => ("Nebbioso", "cloud-fog"),
        48 => ("Deposito di brina", "cloud-fog"),
        51 => ("Pioggia leggera", "cloud-drizzle"),
        53 => ("Pioggia moderata", "cloud-drizzle"),
        55 => ("Pioggia intensa", "cloud-drizzle"),
        61 => ("Pioggia leggera", "cloud-rain"),
        63 => ("Pioggia moderata", "cloud-rain"),
        65 => ("Pioggia intensa", "cloud-rain"),
        71 => ("Neve leggera", "cloud-snow"),
        73 => ("Neve moderata", "cloud-snow"),
        75 => ("Neve intensa", "cloud-snow"),
        77 => ("Chicchi di neve", "cloud-snow"),
        80 => ("Pioggia leggera", "cloud-rain"),
        81 => ("Pioggia moderata", "cloud-rain"),
        82 => ("Pioggia intensa", "cloud-rain"),
        85 => ("Neve leggera", "cloud-snow"),
        86 => ("Neve intensa", "cloud-snow"),
        95 => ("Temporale", "cloud-bolt"),
        96 => ("Temporale con grandine", "cloud-bolt"),
        99 => ("Temporale con grandine", "cloud-bolt"),
        _ => return UNKNOWN_CODE,
    };

    WeatherCodeInfo { description, icon }
}

/// Display unit for temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius (°C)",
            TemperatureUnit::Fahrenheit => "Fahrenheit (°F)",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display unit for wind speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WindSpeedUnit {
    #[default]
    KmPerHour,
    MeterPerSecond,
}

impl WindSpeedUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindSpeedUnit::KmPerHour => "km/h",
            WindSpeedUnit::MeterPerSecond => "m/s",
        }
    }

    pub const fn all() -> &'static [WindSpeedUnit] {
        &[WindSpeedUnit::KmPerHour, WindSpeedUnit::MeterPerSecond]
    }
}

impl fmt::Display for WindSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a Celsius temperature in the requested display unit, rounded
/// half-away-from-zero to the nearest whole degree.
pub fn format_temperature(value_c: f64, unit: TemperatureUnit) -> String {
    match unit {
        TemperatureUnit::Celsius => format!("{}°C", value_c.round() as i64),
        TemperatureUnit::Fahrenheit => {
            let value_f = value_c * 9.0 / 5.0 + 32.0;
            format!("{}°F", value_f.round() as i64)
        }
    }
}

/// Format a km/h wind speed in the requested display unit.
pub fn format_wind_speed(value_kmh: f64, unit: WindSpeedUnit) -> String {
    match unit {
        WindSpeedUnit::KmPerHour => format!("{} km/h", value_kmh.round() as i64),
        WindSpeedUnit::MeterPerSecond => {
            format!("{} m/s", (value_kmh / 3.6).round() as i64)
        }
    }
}

/// Full weekday name for an ISO `YYYY-MM-DD` date in the given locale.
pub fn day_name(date_text: &str, locale: Locale) -> Result<String, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")?;
    Ok(date.format_localized("%A", locale).to_string())
}

/// Abbreviated weekday name; a shorter form of [`day_name`].
pub fn short_day_name(date_text: &str, locale: Locale) -> Result<String, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")?;
    Ok(date.format_localized("%a", locale).to_string())
}
