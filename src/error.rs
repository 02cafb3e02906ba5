//! Error types and handling for the `BurnPlan` service

use thiserror::Error;

/// Main error type for the `BurnPlan` service
#[derive(Error, Debug)]
pub enum BurnPlanError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoder returned no match for the requested place name
    #[error("Could not find location: {query}")]
    LocationNotFound { query: String },

    /// Upstream API communication errors
    #[error("API error: {message}")]
    Api { message: String },
}

impl BurnPlanError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Whether this error is the caller's fault (maps to a 4xx response)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, BurnPlanError::Validation { .. })
    }
}
