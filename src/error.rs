//! Error types and handling for the Suntrack library

use thiserror::Error;

/// Main error type for the Suntrack library
#[derive(Error, Debug)]
pub enum SuntrackError {
    /// Geocoding matched no candidate for the given query. A normal,
    /// expected outcome, distinct from transport failures.
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// Network, transport, status, or parse error on an external call
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The request was superseded by a newer query before it completed
    #[error("Request superseded by a newer query")]
    Superseded,
}

impl SuntrackError {
    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SuntrackError::LocationNotFound { query } => {
                format!("Location not found: {query}. Please try again.")
            }
            SuntrackError::Fetch { .. } => {
                "Error fetching weather data. Please try again.".to_string()
            }
            SuntrackError::InvalidInput { message } => {
                format!("Invalid input: {message}")
            }
            SuntrackError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            SuntrackError::Superseded => "A newer request replaced this one.".to_string(),
        }
    }
}

impl From<reqwest::Error> for SuntrackError {
    fn from(err: reqwest::Error) -> Self {
        SuntrackError::Fetch {
            message: err.to_string(),
        }
    }
}
