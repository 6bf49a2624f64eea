//! Data models for the AgriWeather pipeline
//!
//! This module contains the core domain models organized by concern:
//! - Location: free-text queries and resolved coordinates
//! - Weather: normalized conditions and raw interval samples
//! - Summary: per-day aggregates
//! - Report: advice, crop impact and the final report

pub mod location;
pub mod report;
pub mod summary;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{LocationQuery, ResolvedLocation};
pub use report::{CropImpact, FarmingAdvice, ImpactStatus, WeatherReport};
pub use summary::DailySummary;
pub use weather::{WeatherCondition, WeatherSample};
