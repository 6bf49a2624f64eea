//! Weather fetching
//!
//! Retrieves current conditions and the interval forecast for a resolved
//! location. Both requests run concurrently and both must succeed.

use crate::models::{ResolvedLocation, WeatherSample};
use crate::{AgriWeatherError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

pub mod openweathermap;

pub use openweathermap::{CurrentWeatherResponse, ForecastResponse};

/// Raw weather provider endpoints
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeatherResponse>;

    async fn interval_forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse>;
}

/// Current reading plus interval samples, in metric units
#[derive(Debug, Clone)]
pub struct FetchedWeather {
    pub current: WeatherSample,
    /// Ordered by time ascending
    pub samples: Vec<WeatherSample>,
}

/// Fetches and normalizes weather for a location
#[derive(Clone)]
pub struct WeatherFetcher {
    source: Arc<dyn WeatherSource>,
}

impl WeatherFetcher {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source }
    }

    /// Fetch current conditions and forecast samples.
    ///
    /// Partial success is a failure: if either request fails no data is returned.
    #[instrument(skip(self, location), fields(location = %location.display_label))]
    pub async fn fetch(&self, location: &ResolvedLocation) -> Result<FetchedWeather> {
        let (current, forecast) = futures::try_join!(
            self.source
                .current_conditions(location.latitude, location.longitude),
            self.source
                .interval_forecast(location.latitude, location.longitude)
        )
        .map_err(|e| match e {
            AgriWeatherError::LocationNotFound { .. } => AgriWeatherError::provider_unavailable(
                format!("No weather data for {}", location.format_coordinates()),
            ),
            other => other,
        })?;

        let current = current.to_sample()?;
        let samples = forecast.to_samples()?;
        debug!("Fetched current conditions and {} samples", samples.len());

        Ok(FetchedWeather { current, samples })
    }
}
