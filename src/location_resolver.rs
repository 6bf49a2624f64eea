//! Location Resolution Module
//!
//! This module resolves free-text location input into a `ResolvedLocation`
//! by trying, in order: an exact match against the built-in locations, a
//! substring match against the same list, and finally the geocoding provider.

use crate::api::GeocodingResult;
use crate::models::{LocationQuery, ResolvedLocation};
use crate::{AgriWeatherError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default number of geocoding candidates requested
pub const DEFAULT_GEOCODE_LIMIT: u32 = 5;

/// Free-text geocoding provider
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Return up to `limit` candidates, most relevant first
    async fn geocode(&self, query: &str, limit: u32) -> Result<Vec<GeocodingResult>>;
}

/// A well-known location that resolves without a network call
#[derive(Debug, Clone, Copy)]
pub struct KnownLocation {
    pub label: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub region: &'static str,
}

impl KnownLocation {
    fn resolve(&self) -> ResolvedLocation {
        ResolvedLocation::new(self.label, self.latitude, self.longitude)
            .with_region(Some("India".to_string()), Some(self.region.to_string()))
    }
}

const fn known(
    label: &'static str,
    latitude: f64,
    longitude: f64,
    region: &'static str,
) -> KnownLocation {
    KnownLocation {
        label,
        latitude,
        longitude,
        region,
    }
}

/// Built-in locations, searched in this order
pub const KNOWN_LOCATIONS: &[KnownLocation] = &[
    known("Delhi", 28.6139, 77.2090, "Delhi"),
    known("Mumbai", 19.0760, 72.8777, "Maharashtra"),
    known("Kolkata", 22.5726, 88.3639, "West Bengal"),
    known("Chennai", 13.0827, 80.2707, "Tamil Nadu"),
    known("Bangalore", 12.9716, 77.5946, "Karnataka"),
    known("Hyderabad", 17.3850, 78.4867, "Telangana"),
    known("Pune", 18.5204, 73.8567, "Maharashtra"),
    known("Ahmedabad", 23.0225, 72.5714, "Gujarat"),
    known("Jaipur", 26.9124, 75.7873, "Rajasthan"),
    known("Lucknow", 26.8467, 80.9462, "Uttar Pradesh"),
    known("Chandigarh", 30.7333, 76.7794, "Chandigarh"),
    known("Ludhiana", 30.9010, 75.8573, "Punjab"),
    known("Nagpur", 21.1458, 79.0882, "Maharashtra"),
    known("Patna", 25.5941, 85.1376, "Bihar"),
    known("Bhopal", 23.2599, 77.4126, "Madhya Pradesh"),
];

/// Service for resolving location inputs
#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    geocode_limit: u32,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            geocode_limit: DEFAULT_GEOCODE_LIMIT,
        }
    }

    #[must_use]
    pub fn with_geocode_limit(mut self, limit: u32) -> Self {
        self.geocode_limit = limit;
        self
    }

    /// Resolve free text into a location.
    ///
    /// Input is validated before any lookup, so invalid text never reaches the
    /// geocoding provider.
    #[instrument(skip(self))]
    pub async fn resolve(&self, text: &str) -> Result<ResolvedLocation> {
        let query = LocationQuery::parse(text)?;

        if let Some(known) = Self::match_exact(&query) {
            debug!("Exact built-in match: {}", known.label);
            return Ok(known.resolve());
        }

        if let Some(known) = Self::match_substring(&query) {
            debug!("Substring built-in match: {}", known.label);
            return Ok(known.resolve());
        }

        self.resolve_geocoded(&query).await
    }

    fn match_exact(query: &LocationQuery) -> Option<&'static KnownLocation> {
        KNOWN_LOCATIONS
            .iter()
            .find(|loc| loc.label.eq_ignore_ascii_case(query.as_str()))
    }

    fn match_substring(query: &LocationQuery) -> Option<&'static KnownLocation> {
        let needle = query.as_str().to_lowercase();
        KNOWN_LOCATIONS
            .iter()
            .find(|loc| loc.label.to_lowercase().contains(&needle))
    }

    /// Resolve a location name to coordinates via geocoding
    async fn resolve_geocoded(&self, query: &LocationQuery) -> Result<ResolvedLocation> {
        debug!("Geocoding location name: {}", query.as_str());

        let results = self
            .geocoder
            .geocode(query.as_str(), self.geocode_limit)
            .await?;

        // Use the first (best) result
        let geocoding = results
            .into_iter()
            .next()
            .ok_or_else(|| AgriWeatherError::location_not_found(query.as_str()))?;

        debug!(
            "Found location: {} ({:.4}, {:.4})",
            geocoding.name, geocoding.lat, geocoding.lon
        );

        Ok(ResolvedLocation::from(geocoding))
    }
}
