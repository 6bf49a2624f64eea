//! Weather API client for `OpenWeatherMap` integration
//!
//! This module provides the HTTP client used for geocoding and for retrieving
//! current conditions and interval forecasts. HTTP failures are mapped to
//! typed errors here; recovery is left to the pipeline.

use crate::config::AgriWeatherConfig;
use crate::location_resolver::Geocoder;
use crate::models::ResolvedLocation;
use crate::weather::{CurrentWeatherResponse, ForecastResponse, WeatherSource};
use crate::{AgriWeatherError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Weather API client for `OpenWeatherMap`
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    /// Scheme and host, without trailing slash
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: &AgriWeatherConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("AgriWeather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AgriWeatherError::config(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
            api_key: config.weather.api_key.clone().unwrap_or_default(),
        })
    }

    /// Get current conditions for coordinates
    #[instrument(skip(self))]
    pub async fn get_current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentWeatherResponse> {
        info!("Getting current weather for coordinates: {lat:.4}, {lon:.4}");
        let path = format!("/data/2.5/weather?lat={lat}&lon={lon}&units=metric");
        self.get_json(&path, "current weather").await
    }

    /// Get the three-hour interval forecast for coordinates
    #[instrument(skip(self))]
    pub async fn get_forecast(&self, lat: f64, lon: f64) -> Result<ForecastResponse> {
        info!("Getting interval forecast for coordinates: {lat:.4}, {lon:.4}");
        let path = format!("/data/2.5/forecast?lat={lat}&lon={lon}&units=metric");
        let forecast: ForecastResponse = self.get_json(&path, "forecast").await?;
        debug!("Forecast contains {} samples", forecast.list.len());
        Ok(forecast)
    }

    /// Get geocoding candidates for a free-text location, best match first
    #[instrument(skip(self), fields(location = location_name))]
    pub async fn geocode_direct(
        &self,
        location_name: &str,
        limit: u32,
    ) -> Result<Vec<GeocodingResult>> {
        info!("Geocoding location: '{}'", location_name);

        let path = format!(
            "/geo/1.0/direct?q={}&limit={limit}",
            urlencoding::encode(location_name)
        );
        let results: Vec<GeocodingResult> = self.get_json(&path, location_name).await?;

        if results.is_empty() {
            warn!("No results found for location '{}'", location_name);
        } else {
            debug!(
                "Geocoding results: {:?}",
                results
                    .iter()
                    .map(|r| format!("{} ({:.4}, {:.4})", r.name, r.lat, r.lon))
                    .collect::<Vec<_>>()
            );
        }

        Ok(results)
    }

    /// Issue one GET request and decode the JSON body.
    ///
    /// `subject` names what was requested and ends up in not-found errors.
    /// Errors and logs never carry the full URL, which holds the API key.
    #[instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(&self, path: &str, subject: &str) -> Result<T> {
        let url = format!("{}{}&appid={}", self.base_url, path, self.api_key);
        let start_time = Instant::now();
        debug!("Making HTTP request: {}{}", self.base_url, path);

        let response = self.client.get(&url).send().await.map_err(|e| {
            let e = e.without_url();
            warn!("Network error requesting {}: {}", subject, e);
            if e.is_timeout() {
                AgriWeatherError::provider_unavailable(format!("Request timed out: {subject}"))
            } else {
                AgriWeatherError::provider_unavailable(format!("Network error: {e}"))
            }
        })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        match status {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED => {
                error!("API authentication failed (HTTP 401)");
                return Err(AgriWeatherError::auth(
                    "Invalid API key. Please check your OpenWeatherMap API key.",
                ));
            }
            StatusCode::NOT_FOUND => {
                warn!("Not found (HTTP 404): {}", subject);
                return Err(AgriWeatherError::location_not_found(subject));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);
                warn!("Server rate limit exceeded (HTTP 429), retry after {}s", retry_after);
                return Err(AgriWeatherError::rate_limited(format!(
                    "Retry after {retry_after} seconds"
                )));
            }
            other => {
                let error_msg = format!(
                    "API request failed with status: {} - {}",
                    other.as_u16(),
                    other.canonical_reason().unwrap_or("Unknown error")
                );
                warn!("{}", error_msg);
                return Err(AgriWeatherError::provider_unavailable(error_msg));
            }
        }

        let body = response.json::<T>().await.map_err(|e| {
            error!("Failed to parse {} response: {}", subject, e.without_url());
            AgriWeatherError::provider_unavailable(format!(
                "Invalid {subject} data received from OpenWeatherMap"
            ))
        })?;

        let total_duration = start_time.elapsed();
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(body)
    }
}

#[async_trait]
impl Geocoder for WeatherApiClient {
    async fn geocode(&self, query: &str, limit: u32) -> Result<Vec<GeocodingResult>> {
        self.geocode_direct(query, limit).await
    }
}

#[async_trait]
impl WeatherSource for WeatherApiClient {
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeatherResponse> {
        self.get_current_weather(latitude, longitude).await
    }

    async fn interval_forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse> {
        self.get_forecast(latitude, longitude).await
    }
}

/// Geocoding result from `OpenWeatherMap` API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeocodingResult {
    /// Location name
    pub name: String,
    /// Local names in different languages
    pub local_names: Option<std::collections::HashMap<String, String>>,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Country code
    pub country: Option<String>,
    /// State or province
    pub state: Option<String>,
}

impl From<GeocodingResult> for ResolvedLocation {
    fn from(geocoding: GeocodingResult) -> Self {
        let label = [
            Some(geocoding.name.as_str()),
            geocoding.state.as_deref(),
            geocoding.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        ResolvedLocation::new(label, geocoding.lat, geocoding.lon)
            .with_region(geocoding.country, geocoding.state)
    }
}
