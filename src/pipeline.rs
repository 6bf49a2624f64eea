//! Weather report pipeline
//!
//! Sequences location resolution, weather fetching, daily aggregation and the
//! advisory rules. This is the only place that decides how to recover from a
//! failure: any resolver or fetcher error except invalid input produces a
//! degraded report built from synthetic data.

use crate::advisory::{advise, assess_crops};
use crate::aggregator::aggregate;
use crate::api::WeatherApiClient;
use crate::config::AgriWeatherConfig;
use crate::location_resolver::{Geocoder, LocationResolver};
use crate::models::{DailySummary, WeatherReport};
use crate::synthesizer::synthesize;
use crate::weather::{WeatherFetcher, WeatherSource};
use crate::{AgriWeatherError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Pipeline states.
///
/// `Ready` and `Degraded` are the terminal success states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Resolving,
    Fetching,
    Aggregating,
    Ready,
    Errored,
    Degraded,
}

impl PipelineState {
    #[must_use]
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Resolving)
                | (Resolving, Fetching)
                | (Resolving, Errored)
                | (Fetching, Aggregating)
                | (Fetching, Errored)
                | (Aggregating, Ready)
                | (Errored, Degraded)
        )
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Ready | PipelineState::Degraded)
    }
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Per-invocation state tracker
struct Run {
    state: PipelineState,
}

impl Run {
    fn new() -> Self {
        Self {
            state: PipelineState::Idle,
        }
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        debug!("Pipeline state {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Entry point for the display layer
#[derive(Clone)]
pub struct WeatherPipeline {
    resolver: LocationResolver,
    fetcher: WeatherFetcher,
}

impl WeatherPipeline {
    pub fn new(geocoder: Arc<dyn Geocoder>, source: Arc<dyn WeatherSource>) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder),
            fetcher: WeatherFetcher::new(source),
        }
    }

    /// Build a pipeline backed by the `OpenWeatherMap` client
    pub fn from_config(config: &AgriWeatherConfig) -> Result<Self> {
        let client = Arc::new(WeatherApiClient::new(config)?);
        let mut pipeline = Self::new(client.clone(), client);
        pipeline.resolver = pipeline
            .resolver
            .with_geocode_limit(config.defaults.geocode_limit);
        Ok(pipeline)
    }

    /// Produce a weather report for free-text location input.
    ///
    /// Returns `Err` only for invalid input. Every other failure yields a
    /// degraded report carrying a warning.
    #[instrument(skip(self))]
    pub async fn get_weather_report(&self, location_text: &str) -> Result<WeatherReport> {
        let mut run = Run::new();

        run.advance(PipelineState::Resolving);
        let location = match self.resolver.resolve(location_text).await {
            Ok(location) => location,
            Err(e) if e.is_blocking() => return Err(e),
            Err(e) => return Ok(Self::degrade(&mut run, location_text.trim(), &e)),
        };

        run.advance(PipelineState::Fetching);
        let weather = match self.fetcher.fetch(&location).await {
            Ok(weather) => weather,
            Err(e) => return Ok(Self::degrade(&mut run, &location.display_label, &e)),
        };

        run.advance(PipelineState::Aggregating);
        let forecast = aggregate(&weather.current, &weather.samples);
        let current = forecast.first().cloned().unwrap_or_else(|| {
            DailySummary::from_reading(weather.current.local_date(), &weather.current)
        });

        run.advance(PipelineState::Ready);
        info!(
            "Weather report ready for {} ({} days)",
            location.display_label,
            forecast.len()
        );

        Ok(WeatherReport {
            location: location.display_label,
            advice: advise(&current),
            crop_impacts: assess_crops(&current),
            current,
            forecast,
            state: run.state,
            warning: None,
        })
    }

    fn degrade(run: &mut Run, label: &str, error: &AgriWeatherError) -> WeatherReport {
        run.advance(PipelineState::Errored);
        warn!("Live weather unavailable for '{}': {}", label, error);

        let mut report = synthesize(label);
        run.advance(PipelineState::Degraded);

        report.state = run.state;
        report.warning = Some(format!(
            "{} Showing simulated weather data instead.",
            error.user_message()
        ));
        report
    }
}
