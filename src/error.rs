//! Error types and handling for the `AgriWeather` pipeline

use thiserror::Error;

/// Main error type for the weather intelligence pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgriWeatherError {
    /// Location text is empty or too short to search for
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// No built-in or geocoded candidate matched the query
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// The provider rejected our credentials (HTTP 401)
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// The provider throttled us (HTTP 429)
    #[error("Rate limit exceeded: {message}")]
    RateLimited { message: String },

    /// Network failure, timeout, unexpected status or undecodable body
    #[error("Provider unavailable: {message}")]
    ProviderUnavailable { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AgriWeatherError {
    /// Create a new input validation error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new location-not-found error
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new authentication error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a new rate limit error
    pub fn rate_limited<S: Into<String>>(message: S) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Create a new provider unavailable error
    pub fn provider_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error must stop report generation.
    ///
    /// Provider failures never block: the pipeline recovers from them with
    /// synthetic data.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::Config { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => format!("Invalid input: {message}"),
            Self::LocationNotFound { query } => {
                format!("Could not find a location matching '{query}'.")
            }
            Self::Auth { .. } => {
                "Weather provider rejected the API key. Please check your configuration."
                    .to_string()
            }
            Self::RateLimited { .. } => {
                "Weather provider is rate limiting requests. Please try again later.".to_string()
            }
            Self::ProviderUnavailable { .. } => {
                "Unable to reach the weather provider. Please check your internet connection."
                    .to_string()
            }
            Self::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}
