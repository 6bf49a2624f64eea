//! `OpenWeatherMap` API response structures and conversion utilities

use crate::models::{WeatherCondition, WeatherSample};
use crate::{AgriWeatherError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Metres per second to kilometres per hour
const MS_TO_KMH: f64 = 3.6;

/// Current conditions response (`/data/2.5/weather`)
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    /// Observation time, unix seconds
    pub dt: i64,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: i32,
    pub main: MainData,
    #[serde(default)]
    pub wind: WindData,
    pub rain: Option<RainData>,
    #[serde(default)]
    pub weather: Vec<ConditionData>,
    pub name: Option<String>,
}

/// Interval forecast response (`/data/2.5/forecast`)
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
    pub city: Option<CityData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: MainData,
    #[serde(default)]
    pub wind: WindData,
    pub rain: Option<RainData>,
    #[serde(default)]
    pub weather: Vec<ConditionData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityData {
    pub name: Option<String>,
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainData {
    /// Temperature in Celsius (`units=metric`)
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindData {
    /// Wind speed in m/s (`units=metric`)
    #[serde(default)]
    pub speed: f64,
}

/// Rain volume over the last one or three hours, in mm
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RainData {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h")]
    pub three_hour: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionData {
    /// Condition group, e.g. "Rain", "Clouds"
    pub main: String,
    pub description: Option<String>,
}

/// Map the provider's condition group to a normalized condition
#[must_use]
pub fn map_condition(main: &str) -> WeatherCondition {
    match main {
        "Clear" => WeatherCondition::Sunny,
        "Clouds" => WeatherCondition::Cloudy,
        "Rain" | "Drizzle" => WeatherCondition::Rainy,
        "Thunderstorm" => WeatherCondition::Thunderstorm,
        "Snow" => WeatherCondition::Snowy,
        _ => WeatherCondition::PartlyCloudy,
    }
}

fn first_condition(weather: &[ConditionData]) -> WeatherCondition {
    weather
        .first()
        .map_or(WeatherCondition::PartlyCloudy, |w| map_condition(&w.main))
}

fn timestamp(dt: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(dt, 0).ok_or_else(|| {
        AgriWeatherError::provider_unavailable(format!("Invalid observation time: {dt}"))
    })
}

impl CurrentWeatherResponse {
    /// Convert to a sample in metric units
    pub fn to_sample(&self) -> Result<WeatherSample> {
        let rainfall = self
            .rain
            .as_ref()
            .and_then(|r| r.one_hour.or(r.three_hour))
            .unwrap_or(0.0);

        Ok(WeatherSample {
            timestamp_utc: timestamp(self.dt)?,
            utc_offset_seconds: self.timezone,
            temperature_c: self.main.temp,
            humidity_percent: self.main.humidity,
            rainfall_mm: rainfall,
            wind_speed_kmh: self.wind.speed * MS_TO_KMH,
            condition: first_condition(&self.weather),
        })
    }
}

impl ForecastResponse {
    /// Convert every interval entry to a sample, sorted by time ascending
    pub fn to_samples(&self) -> Result<Vec<WeatherSample>> {
        let offset = self.city.as_ref().map_or(0, |c| c.timezone);

        let mut samples: Vec<WeatherSample> = self
            .list
            .iter()
            .map(|entry| {
                Ok(WeatherSample {
                    timestamp_utc: timestamp(entry.dt)?,
                    utc_offset_seconds: offset,
                    temperature_c: entry.main.temp,
                    humidity_percent: entry.main.humidity,
                    rainfall_mm: entry
                        .rain
                        .as_ref()
                        .and_then(|r| r.three_hour.or(r.one_hour))
                        .unwrap_or(0.0),
                    wind_speed_kmh: entry.wind.speed * MS_TO_KMH,
                    condition: first_condition(&entry.weather),
                })
            })
            .collect::<Result<_>>()?;

        samples.sort_by_key(|s| s.timestamp_utc);
        Ok(samples)
    }
}
