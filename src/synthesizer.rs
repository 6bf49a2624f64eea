//! Synthetic weather for degraded reports
//!
//! Used only when live data cannot be retrieved. A synthesized report never
//! contains live values.

use crate::advisory::{advise, assess_crops};
use crate::aggregator::MAX_FORECAST_DAYS;
use crate::models::summary::weekday_name;
use crate::models::{DailySummary, WeatherCondition, WeatherReport};
use crate::pipeline::PipelineState;
use chrono::{Duration, Local, NaiveDate};
use rand::RngExt;

/// Build a seven-day synthetic report starting on today's local date
#[must_use]
pub fn synthesize(label: &str) -> WeatherReport {
    synthesize_with(label, &mut rand::rng(), Local::now().date_naive())
}

/// Build a synthetic report from `rng`, with the first day on `start`
pub fn synthesize_with(label: &str, rng: &mut impl RngExt, start: NaiveDate) -> WeatherReport {
    let base_temp: f64 = rng.random_range(20.0..=35.0);
    let base_humidity: f64 = rng.random_range(50.0..=80.0);
    let base_rainfall: f64 = rng.random_range(0.0..=20.0);

    let forecast: Vec<DailySummary> = (0..MAX_FORECAST_DAYS)
        .map(|offset| {
            let date = start + Duration::days(offset as i64);

            let temp_max = (base_temp + rng.random_range(-3.0..=3.0_f64)).round();
            let temp_min = temp_max - rng.random_range(5.0..=10.0_f64).round();
            let humidity = (base_humidity + rng.random_range(-10.0..=10.0_f64))
                .clamp(0.0, 100.0)
                .round();
            let rainfall = (base_rainfall + rng.random_range(-5.0..=5.0_f64)).max(0.0).round();
            let wind = rng.random_range(5.0..=25.0_f64).round();
            let condition = synthetic_condition(rainfall, humidity);

            DailySummary {
                date,
                day_of_week: weekday_name(date),
                temp_max_c: temp_max,
                temp_min_c: temp_min,
                humidity_percent: humidity,
                rainfall_mm: rainfall,
                wind_speed_kmh: wind,
                condition,
                icon: condition.icon_name().to_string(),
            }
        })
        .collect();

    // (0..MAX_FORECAST_DAYS) is never empty
    let current = forecast[0].clone();

    WeatherReport {
        location: label.to_string(),
        advice: advise(&current),
        crop_impacts: assess_crops(&current),
        current,
        forecast,
        state: PipelineState::Degraded,
        warning: None,
    }
}

fn synthetic_condition(rainfall: f64, humidity: f64) -> WeatherCondition {
    if rainfall > 10.0 {
        WeatherCondition::Rainy
    } else if rainfall > 3.0 {
        WeatherCondition::Cloudy
    } else if humidity > 70.0 {
        WeatherCondition::PartlyCloudy
    } else {
        WeatherCondition::Sunny
    }
}
