//! Daily aggregation of interval weather samples
//!
//! Samples are bucketed by local calendar date. Each bucket becomes one
//! `DailySummary`; only the first seven dates are kept, and the first
//! summary is rebuilt from the current-conditions reading.

use crate::models::summary::weekday_name;
use crate::models::{DailySummary, WeatherCondition, WeatherSample};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Maximum number of days in a forecast
pub const MAX_FORECAST_DAYS: usize = 7;

/// Collapse interval samples into at most seven daily summaries, date ascending.
///
/// The first summary's weather fields are replaced by `current`; its date stays
/// that of the bucket.
#[must_use]
pub fn aggregate(current: &WeatherSample, samples: &[WeatherSample]) -> Vec<DailySummary> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&WeatherSample>> = BTreeMap::new();
    for sample in samples {
        buckets.entry(sample.local_date()).or_default().push(sample);
    }

    let mut summaries: Vec<DailySummary> = buckets
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(date, group)| summarize_day(date, &group))
        .collect();

    if let Some(first) = summaries.first_mut() {
        *first = DailySummary::from_reading(first.date, current);
    }

    summaries
}

/// Summarize one non-empty group of samples sharing a date
fn summarize_day(date: NaiveDate, group: &[&WeatherSample]) -> DailySummary {
    let count = group.len() as f64;

    let temp_max = group
        .iter()
        .map(|s| s.temperature_c)
        .fold(f64::NEG_INFINITY, f64::max);
    let temp_min = group
        .iter()
        .map(|s| s.temperature_c)
        .fold(f64::INFINITY, f64::min);
    let humidity = group.iter().map(|s| s.humidity_percent).sum::<f64>() / count;
    let rainfall = group.iter().map(|s| s.rainfall_mm).sum::<f64>();
    let wind = group.iter().map(|s| s.wind_speed_kmh).sum::<f64>() / count;
    let condition = majority_condition(group.iter().map(|s| s.condition));

    DailySummary {
        date,
        day_of_week: weekday_name(date),
        temp_max_c: temp_max,
        temp_min_c: temp_min,
        humidity_percent: humidity.round().max(0.0),
        rainfall_mm: rainfall.round().max(0.0),
        wind_speed_kmh: wind.round(),
        condition,
        icon: condition.icon_name().to_string(),
    }
}

/// Most frequent condition.
///
/// Counts are kept in first-seen order and stably sorted by count; the last
/// entry wins, so among tied conditions the one first seen latest is chosen.
fn majority_condition(conditions: impl Iterator<Item = WeatherCondition>) -> WeatherCondition {
    let mut counts: Vec<(WeatherCondition, usize)> = Vec::new();
    for condition in conditions {
        match counts.iter_mut().find(|(c, _)| *c == condition) {
            Some((_, n)) => *n += 1,
            None => counts.push((condition, 1)),
        }
    }

    counts.sort_by_key(|(_, n)| *n);
    counts.pop().map(|(c, _)| c).unwrap_or_default()
}
