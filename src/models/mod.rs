//! Data models for the weather checker
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and map links
//! - Weather: Current conditions, units and conversions
//! - Settings: Persisted preferences and the favorites list

pub mod location;
pub mod settings;
pub mod weather;

// Re-export all public types for convenient access
pub use location::Coordinates;
pub use settings::{FavoritesList, MAX_FAVORITES, Settings};
pub use weather::{TemperatureUnit, Units, WeatherRecord, celsius_to_fahrenheit};
