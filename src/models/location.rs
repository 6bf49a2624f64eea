//! Location query and resolved location models

use crate::{AgriWeatherError, Result};
use serde::{Deserialize, Serialize};

/// Validated free-text location query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Minimum number of characters after trimming
    pub const MIN_LENGTH: usize = 2;

    /// Trim and validate raw user input
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(AgriWeatherError::invalid_input("Location cannot be empty"));
        }

        if trimmed.chars().count() < Self::MIN_LENGTH {
            return Err(AgriWeatherError::invalid_input(format!(
                "Location must be at least {} characters",
                Self::MIN_LENGTH
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Location coordinates with a human-readable label
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Label shown to the user (e.g. "Delhi" or "Nashik, Maharashtra, IN")
    pub display_label: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Country name or code
    pub country: Option<String>,
    /// State, province or other first-level region
    pub region: Option<String>,
}

impl ResolvedLocation {
    /// Create a new location
    #[must_use]
    pub fn new(display_label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            display_label: display_label.into(),
            latitude,
            longitude,
            country: None,
            region: None,
        }
    }

    /// Attach country and region metadata
    #[must_use]
    pub fn with_region(mut self, country: Option<String>, region: Option<String>) -> Self {
        self.country = country;
        self.region = region;
        self
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
