//! Error types and handling for the weather checker

use thiserror::Error;

/// Main error type for the weather checker
#[derive(Error, Debug)]
pub enum WeatherCheckError {
    /// Geocoding or weather lookup returned no match or a non-success status
    #[error("Place not found: {place}")]
    PlaceNotFound { place: String },

    /// Network failure, timeout or unreadable provider response
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Named timezone invalid or undeterminable from coordinates
    #[error("Timezone resolution error: {message}")]
    TimezoneResolution { message: String },

    /// Settings file unreadable or unwritable
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherCheckError {
    /// Create a new place-not-found error
    pub fn place_not_found<S: Into<String>>(place: S) -> Self {
        Self::PlaceNotFound {
            place: place.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new timezone resolution error
    pub fn timezone<S: Into<String>>(message: S) -> Self {
        Self::TimezoneResolution {
            message: message.into(),
        }
    }

    /// Create a new persistence error
    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

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

    /// Whether the error means the place is unknown to the provider
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlaceNotFound { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherCheckError::PlaceNotFound { .. } => {
                "City not found. Please check the name and try again.".to_string()
            }
            WeatherCheckError::Transport { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            WeatherCheckError::TimezoneResolution { message } => {
                format!("Could not determine local time: {message}")
            }
            WeatherCheckError::Persistence { .. } => {
                "Settings could not be saved or loaded. Changes will last for this session only."
                    .to_string()
            }
            WeatherCheckError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file and API key.")
            }
            WeatherCheckError::Validation { message } => message.clone(),
            WeatherCheckError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for WeatherCheckError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        let err = err.without_url();
        if err.is_timeout() {
            Self::transport(format!("request timed out: {err}"))
        } else if err.is_decode() {
            Self::transport(format!("malformed provider response: {err}"))
        } else {
            Self::transport(err.to_string())
        }
    }
}
