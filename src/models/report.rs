//! Farming advice, crop impact and the report handed to the display layer

use super::DailySummary;
use crate::pipeline::PipelineState;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Ordered recommendation lines, in rule-evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FarmingAdvice(Vec<String>);

impl FarmingAdvice {
    pub fn push(&mut self, line: &str) {
        self.0.push(line.to_string());
    }

    #[must_use]
    pub fn contains(&self, line: &str) -> bool {
        self.0.iter().any(|l| l == line)
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Qualitative outlook for a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactStatus {
    Favorable,
    Moderate,
    Challenging,
}

impl ImpactStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Favorable => "Favorable",
            Self::Moderate => "Moderate",
            Self::Challenging => "Challenging",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropImpact {
    pub crop: String,
    pub status: ImpactStatus,
    pub description: String,
}

/// Everything the display layer needs for one render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Display label of the resolved (or requested) location
    pub location: String,
    /// Today's summary; same value as `forecast[0]` when a forecast exists
    pub current: DailySummary,
    /// Up to seven days, today first
    pub forecast: Vec<DailySummary>,
    pub advice: FarmingAdvice,
    pub crop_impacts: Vec<CropImpact>,
    /// `Ready` for live data, `Degraded` for synthetic data
    pub state: PipelineState,
    /// Non-fatal advisory shown next to a degraded report
    pub warning: Option<String>,
}

impl WeatherReport {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.state == PipelineState::Degraded
    }
}

impl Display for WeatherReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "🌾 Weather report for {}", self.location)?;
        if self.is_degraded() {
            writeln!(f, "   ⚠️ Simulated data (live weather unavailable)")?;
        }
        writeln!(f)?;
        writeln!(f, "Today: {}", self.current)?;
        writeln!(f)?;

        writeln!(f, "Forecast:")?;
        for day in &self.forecast {
            writeln!(f, "   {day}")?;
        }
        writeln!(f)?;

        writeln!(f, "Farming advice:")?;
        for line in self.advice.lines() {
            writeln!(f, "   • {line}")?;
        }
        writeln!(f)?;

        writeln!(f, "Crop impact:")?;
        for impact in &self.crop_impacts {
            writeln!(
                f,
                "   {:<7} {:<11} {}",
                impact.crop,
                impact.status.label(),
                impact.description
            )?;
        }
        Ok(())
    }
}
