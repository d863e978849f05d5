//! Weather Checker - current weather, destination local time and favorite cities
//!
//! This library provides geocoding and current-weather lookups, named
//! timezone resolution, and a small persisted list of favorite places.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod favorites;
pub mod local_time;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod timezone;
pub mod weather;

// Re-export core types for public API
pub use api::{
    Geocoder, LocationInput, LocationParser, WeatherApiClient, WeatherQuery, WeatherSource,
};
pub use app::{App, FavoriteOutcome, LocalTimeDisplay, WeatherReport};
pub use config::WeatherCheckConfig;
pub use error::WeatherCheckError;
pub use favorites::SettingsStore;
pub use local_time::{Clock, SystemClock, local_time_at};
pub use location_resolver::LocationResolver;
pub use models::{Coordinates, FavoritesList, Settings, TemperatureUnit, Units, WeatherRecord};
pub use timezone::{DualLocalTimes, LocationTimezone, dual_local_times};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherCheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
