//! Daily weather summary model

use super::{WeatherCondition, WeatherSample};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One aggregated weather record per calendar day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// English weekday name, e.g. "Monday"
    pub day_of_week: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    /// Mean relative humidity
    pub humidity_percent: f64,
    /// Total rainfall for the day
    pub rainfall_mm: f64,
    /// Mean wind speed
    pub wind_speed_kmh: f64,
    pub condition: WeatherCondition,
    pub icon: String,
}

impl DailySummary {
    /// Build a summary for `date` entirely from one authoritative reading.
    ///
    /// Both temperature bounds take the reading's temperature.
    #[must_use]
    pub fn from_reading(date: NaiveDate, reading: &WeatherSample) -> Self {
        Self {
            date,
            day_of_week: weekday_name(date),
            temp_max_c: reading.temperature_c,
            temp_min_c: reading.temperature_c,
            humidity_percent: reading.humidity_percent.max(0.0),
            rainfall_mm: reading.rainfall_mm.max(0.0),
            wind_speed_kmh: reading.wind_speed_kmh,
            condition: reading.condition,
            icon: reading.condition.icon_name().to_string(),
        }
    }

    /// Format temperature range with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.0}°C / {:.0}°C", self.temp_max_c, self.temp_min_c)
    }
}

#[must_use]
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

impl Display for DailySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<9} {}  {:<13} {:>14}  💧 {:>3.0}%  🌧 {:>3.0} mm  💨 {:>3.0} km/h",
            self.day_of_week,
            self.date,
            self.condition.description(),
            self.format_temperature(),
            self.humidity_percent,
            self.rainfall_mm,
            self.wind_speed_kmh
        )
    }
}
