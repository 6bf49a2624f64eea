//! Weather condition and raw interval sample models

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Normalized weather condition categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Thunderstorm,
    Snowy,
    #[default]
    PartlyCloudy,
}

impl WeatherCondition {
    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Rainy => "Rainy",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snowy => "Snowy",
            Self::PartlyCloudy => "Partly Cloudy",
        }
    }

    /// Get icon name for the display layer
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Sunny => "sun",
            Self::Cloudy => "cloud",
            Self::Rainy => "cloud_rain",
            Self::Thunderstorm => "cloud_lightning",
            Self::Snowy => "cloud_snow",
            Self::PartlyCloudy => "cloud_sun",
        }
    }
}

/// One sub-daily weather observation, already in metric units
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSample {
    /// Observation time
    pub timestamp_utc: DateTime<Utc>,
    /// Offset of the location's local time from UTC, in seconds
    pub utc_offset_seconds: i32,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Relative humidity (0-100)
    pub humidity_percent: f64,
    /// Rainfall in mm over the sample's accumulation window
    pub rainfall_mm: f64,
    /// Wind speed in km/h
    pub wind_speed_kmh: f64,
    pub condition: WeatherCondition,
}

impl WeatherSample {
    /// Calendar date at the sampled location
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        match FixedOffset::east_opt(self.utc_offset_seconds) {
            Some(offset) => self.timestamp_utc.with_timezone(&offset).date_naive(),
            None => self.timestamp_utc.date_naive(),
        }
    }
}
