//! `AgriWeather` - weather intelligence for farmers
//!
//! This library resolves a free-text location, fetches live weather,
//! aggregates it into daily summaries and derives farming advice and crop
//! impact. When live data is unavailable it falls back to clearly marked
//! synthetic data so a report can always be shown.

pub mod advisory;
pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod pipeline;
pub mod synthesizer;
pub mod telemetry;
pub mod weather;

// Re-export core types for public API
pub use advisory::{advise, assess_crops};
pub use aggregator::aggregate;
pub use api::{GeocodingResult, WeatherApiClient};
pub use config::AgriWeatherConfig;
pub use error::AgriWeatherError;
pub use location_resolver::{Geocoder, LocationResolver};
pub use models::{
    CropImpact, DailySummary, FarmingAdvice, ImpactStatus, LocationQuery, ResolvedLocation,
    WeatherCondition, WeatherReport, WeatherSample,
};
pub use pipeline::{PipelineState, WeatherPipeline};
pub use synthesizer::synthesize;
pub use weather::{FetchedWeather, WeatherFetcher, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AgriWeatherError>;
