//! Farming advisory rules
//!
//! Deterministic threshold rules mapping a daily summary to farming advice
//! and to per-crop impact narratives. No I/O, no state.

use crate::models::{CropImpact, DailySummary, FarmingAdvice, ImpactStatus};

pub const HEAVY_RAIN_MM: f64 = 15.0;
pub const LOW_RAIN_MM: f64 = 5.0;
pub const HOT_TEMP_C: f64 = 35.0;
pub const COOL_TEMP_C: f64 = 20.0;
pub const HUMID_PERCENT: f64 = 80.0;
pub const WINDY_KMH: f64 = 20.0;

pub const DRAINAGE_WARNING: &str =
    "Heavy rainfall expected: ensure proper field drainage to prevent waterlogging";
pub const POSTPONE_HARVEST: &str = "Postpone harvesting until fields dry out";
pub const TRANSPLANTING_NOTE: &str =
    "Good conditions for transplanting water-loving crops such as rice";

pub const IRRIGATION_WARNING: &str = "Low rainfall: plan irrigation for your crops";
pub const HARVEST_NOTE: &str = "Dry conditions are good for harvesting";
pub const SOIL_MOISTURE_NOTE: &str = "Monitor soil moisture levels regularly";

pub const LIVESTOCK_SHADE_WARNING: &str =
    "High temperatures: provide shade and extra water for livestock";
pub const COOLER_HOURS_NOTE: &str =
    "Shift field work to the cooler early morning and evening hours";

pub const COLD_PROTECTION_WARNING: &str = "Cool temperatures: protect sensitive crops from cold";
pub const FROST_NOTE: &str = "Consider frost protection measures for nurseries and seedlings";

pub const FUNGAL_WARNING: &str = "High humidity: watch for fungal diseases in your crops";
pub const VENTILATION_NOTE: &str = "Ensure good ventilation in greenhouses and storage areas";

pub const SECURE_STRUCTURES_WARNING: &str =
    "Strong winds: secure greenhouses, shade nets and loose structures";
pub const SEEDLING_WIND_NOTE: &str = "Protect young seedlings and tall crops from wind damage";

pub const NORMAL_CONDITIONS: &str = "Weather conditions are normal for regular farming activities";

/// Derive farming advice from a daily summary.
///
/// Rules are evaluated in a fixed order and each may add lines; the default
/// message appears alone when no rule fires.
#[must_use]
pub fn advise(summary: &DailySummary) -> FarmingAdvice {
    let mut advice = FarmingAdvice::default();

    if summary.rainfall_mm > HEAVY_RAIN_MM {
        advice.push(DRAINAGE_WARNING);
        advice.push(POSTPONE_HARVEST);
        advice.push(TRANSPLANTING_NOTE);
    } else if summary.rainfall_mm < LOW_RAIN_MM {
        advice.push(IRRIGATION_WARNING);
        advice.push(HARVEST_NOTE);
        advice.push(SOIL_MOISTURE_NOTE);
    }

    if summary.temp_max_c > HOT_TEMP_C {
        advice.push(LIVESTOCK_SHADE_WARNING);
        advice.push(COOLER_HOURS_NOTE);
    } else if summary.temp_max_c < COOL_TEMP_C {
        advice.push(COLD_PROTECTION_WARNING);
        advice.push(FROST_NOTE);
    }

    if summary.humidity_percent > HUMID_PERCENT {
        advice.push(FUNGAL_WARNING);
        advice.push(VENTILATION_NOTE);
    }

    if summary.wind_speed_kmh > WINDY_KMH {
        advice.push(SECURE_STRUCTURES_WARNING);
        advice.push(SEEDLING_WIND_NOTE);
    }

    if advice.is_empty() {
        advice.push(NORMAL_CONDITIONS);
    }

    advice
}

/// Crops covered by the impact assessment, in report order
pub const CROPS: [&str; 4] = ["Wheat", "Rice", "Cotton", "Maize"];

/// Assess weather impact on each crop in `CROPS`
#[must_use]
pub fn assess_crops(summary: &DailySummary) -> Vec<CropImpact> {
    vec![
        wheat_impact(summary),
        rice_impact(summary),
        cotton_impact(summary),
        maize_impact(summary),
    ]
}

fn impact(crop: &str, status: ImpactStatus, description: String) -> CropImpact {
    CropImpact {
        crop: crop.to_string(),
        status,
        description,
    }
}

fn wheat_impact(summary: &DailySummary) -> CropImpact {
    let (status, mut description) = if summary.temp_max_c > 30.0 {
        (
            ImpactStatus::Challenging,
            "High temperatures may stress wheat during grain filling.".to_string(),
        )
    } else {
        (
            ImpactStatus::Favorable,
            "Temperatures are suitable for wheat growth.".to_string(),
        )
    };

    if summary.rainfall_mm > 10.0 {
        description.push_str(" Excess moisture raises the risk of rust and lodging.");
    }

    impact("Wheat", status, description)
}

fn rice_impact(summary: &DailySummary) -> CropImpact {
    if summary.rainfall_mm > 10.0 {
        impact(
            "Rice",
            ImpactStatus::Favorable,
            "Good rainfall supports paddy growth.".to_string(),
        )
    } else if summary.temp_max_c > HOT_TEMP_C {
        impact(
            "Rice",
            ImpactStatus::Challenging,
            "Heat with little rain can cause spikelet sterility; keep fields flooded.".to_string(),
        )
    } else {
        impact(
            "Rice",
            ImpactStatus::Moderate,
            "Maintain standing water through irrigation.".to_string(),
        )
    }
}

fn cotton_impact(summary: &DailySummary) -> CropImpact {
    if summary.humidity_percent > HUMID_PERCENT {
        impact(
            "Cotton",
            ImpactStatus::Challenging,
            "High humidity increases boll rot and pest pressure.".to_string(),
        )
    } else if summary.temp_max_c < COOL_TEMP_C {
        impact(
            "Cotton",
            ImpactStatus::Moderate,
            "Cool weather slows boll development.".to_string(),
        )
    } else {
        impact(
            "Cotton",
            ImpactStatus::Favorable,
            "Warm, dry conditions favour cotton.".to_string(),
        )
    }
}

fn maize_impact(summary: &DailySummary) -> CropImpact {
    if summary.temp_max_c > HOT_TEMP_C {
        impact(
            "Maize",
            ImpactStatus::Challenging,
            "Extreme heat may impair pollination.".to_string(),
        )
    } else if summary.rainfall_mm < LOW_RAIN_MM {
        impact(
            "Maize",
            ImpactStatus::Moderate,
            "Irrigate to support tasseling and grain fill.".to_string(),
        )
    } else {
        impact(
            "Maize",
            ImpactStatus::Favorable,
            "Conditions support healthy maize growth.".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherCondition;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn summary(temp_max: f64, rainfall: f64, humidity: f64, wind: f64) -> DailySummary {
        DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            day_of_week: "Monday".to_string(),
            temp_max_c: temp_max,
            temp_min_c: temp_max - 8.0,
            humidity_percent: humidity,
            rainfall_mm: rainfall,
            wind_speed_kmh: wind,
            condition: WeatherCondition::Cloudy,
            icon: "cloud".to_string(),
        }
    }

    /// A summary where no rule fires
    fn mild() -> DailySummary {
        summary(28.0, 10.0, 60.0, 10.0)
    }

    #[test]
    fn test_four_rules_fire_together() {
        let advice = advise(&summary(38.0, 20.0, 85.0, 25.0));

        assert!(advice.contains(DRAINAGE_WARNING));
        assert!(advice.contains(LIVESTOCK_SHADE_WARNING));
        assert!(advice.contains(FUNGAL_WARNING));
        assert!(advice.contains(SECURE_STRUCTURES_WARNING));
        assert!(!advice.contains(NORMAL_CONDITIONS));
        assert_eq!(advice.len(), 9);
    }

    #[test]
    fn test_default_message_alone_when_no_rule_fires() {
        let advice = advise(&mild());
        assert_eq!(advice.lines(), [NORMAL_CONDITIONS.to_string()]);
    }

    #[test]
    fn test_advice_follows_rule_order() {
        let advice = advise(&summary(15.0, 2.0, 90.0, 30.0));
        assert_eq!(
            advice.lines(),
            [
                IRRIGATION_WARNING,
                HARVEST_NOTE,
                SOIL_MOISTURE_NOTE,
                COLD_PROTECTION_WARNING,
                FROST_NOTE,
                FUNGAL_WARNING,
                VENTILATION_NOTE,
                SECURE_STRUCTURES_WARNING,
                SEEDLING_WIND_NOTE,
            ]
            .map(String::from)
        );
    }

    #[test]
    fn test_advise_is_pure() {
        let input = summary(36.0, 1.0, 82.0, 5.0);
        assert_eq!(advise(&input), advise(&input));
    }

    #[rstest]
    // thresholds are strict: the boundary value itself does not fire
    #[case(summary(28.0, 15.0, 60.0, 10.0), DRAINAGE_WARNING, false)]
    #[case(summary(28.0, 15.1, 60.0, 10.0), DRAINAGE_WARNING, true)]
    #[case(summary(28.0, 5.0, 60.0, 10.0), IRRIGATION_WARNING, false)]
    #[case(summary(28.0, 4.9, 60.0, 10.0), IRRIGATION_WARNING, true)]
    #[case(summary(35.0, 10.0, 60.0, 10.0), LIVESTOCK_SHADE_WARNING, false)]
    #[case(summary(35.1, 10.0, 60.0, 10.0), LIVESTOCK_SHADE_WARNING, true)]
    #[case(summary(20.0, 10.0, 60.0, 10.0), COLD_PROTECTION_WARNING, false)]
    #[case(summary(19.9, 10.0, 60.0, 10.0), COLD_PROTECTION_WARNING, true)]
    #[case(summary(28.0, 10.0, 80.0, 10.0), FUNGAL_WARNING, false)]
    #[case(summary(28.0, 10.0, 80.1, 10.0), FUNGAL_WARNING, true)]
    #[case(summary(28.0, 10.0, 60.0, 20.0), SECURE_STRUCTURES_WARNING, false)]
    #[case(summary(28.0, 10.0, 60.0, 20.1), SECURE_STRUCTURES_WARNING, true)]
    fn test_rule_boundaries(
        #[case] input: DailySummary,
        #[case] line: &str,
        #[case] expected: bool,
    ) {
        let advice = advise(&input);
        assert_eq!(advice.contains(line), expected);
        assert_eq!(advice.contains(NORMAL_CONDITIONS), !expected);
    }

    #[test]
    fn test_crop_set_and_order() {
        let impacts = assess_crops(&mild());
        let crops: Vec<&str> = impacts.iter().map(|i| i.crop.as_str()).collect();
        assert_eq!(crops, CROPS);
    }

    #[rstest]
    #[case(30.0, 0.0, ImpactStatus::Favorable)]
    #[case(30.1, 0.0, ImpactStatus::Challenging)]
    fn test_wheat_temperature_threshold(
        #[case] temp_max: f64,
        #[case] rainfall: f64,
        #[case] expected: ImpactStatus,
    ) {
        let impact = wheat_impact(&summary(temp_max, rainfall, 50.0, 5.0));
        assert_eq!(impact.status, expected);
        assert!(!impact.description.contains("moisture"));
    }

    #[test]
    fn test_wheat_moisture_caveat() {
        let dry = wheat_impact(&summary(25.0, 10.0, 50.0, 5.0));
        let wet = wheat_impact(&summary(25.0, 10.5, 50.0, 5.0));
        assert!(!dry.description.contains("moisture"));
        assert!(wet.description.contains("moisture"));
        assert_eq!(wet.status, ImpactStatus::Favorable);
    }

    #[rstest]
    #[case(summary(38.0, 12.0, 50.0, 5.0), ImpactStatus::Favorable)]
    #[case(summary(38.0, 2.0, 50.0, 5.0), ImpactStatus::Challenging)]
    #[case(summary(28.0, 2.0, 50.0, 5.0), ImpactStatus::Moderate)]
    fn test_rice_rules(#[case] input: DailySummary, #[case] expected: ImpactStatus) {
        assert_eq!(rice_impact(&input).status, expected);
    }

    #[rstest]
    #[case(summary(28.0, 5.0, 85.0, 5.0), ImpactStatus::Challenging)]
    #[case(summary(18.0, 5.0, 60.0, 5.0), ImpactStatus::Moderate)]
    #[case(summary(28.0, 5.0, 60.0, 5.0), ImpactStatus::Favorable)]
    fn test_cotton_rules(#[case] input: DailySummary, #[case] expected: ImpactStatus) {
        assert_eq!(cotton_impact(&input).status, expected);
    }

    #[rstest]
    #[case(summary(36.0, 8.0, 60.0, 5.0), ImpactStatus::Challenging)]
    #[case(summary(30.0, 3.0, 60.0, 5.0), ImpactStatus::Moderate)]
    #[case(summary(30.0, 8.0, 60.0, 5.0), ImpactStatus::Favorable)]
    fn test_maize_rules(#[case] input: DailySummary, #[case] expected: ImpactStatus) {
        assert_eq!(maize_impact(&input).status, expected);
    }
}
