//! Location Resolution Module
//!
//! This module resolves free-text place names into coordinates through the
//! geocoding provider.

use crate::api::{Geocoder, LocationInput};
use crate::models::Coordinates;
use crate::{Result, WeatherCheckError};
use tracing::debug;

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a location input into coordinates
    pub fn resolve_input(geocoder: &impl Geocoder, input: &LocationInput) -> Result<Coordinates> {
        match input {
            LocationInput::Coordinates(coordinates) => Ok(*coordinates),
            LocationInput::Name(name) => Self::resolve(geocoder, name),
        }
    }

    /// Resolve a place name to the coordinates of its first geocoding match
    pub fn resolve(geocoder: &impl Geocoder, place_name: &str) -> Result<Coordinates> {
        debug!("Geocoding location name: {}", place_name);

        let results = geocoder.geocode(place_name, 1)?;
        let Some(first) = results.first() else {
            return Err(WeatherCheckError::place_not_found(place_name));
        };

        debug!(
            "Found location: {} ({:.4}, {:.4})",
            first.name, first.lat, first.lon
        );

        Ok(Coordinates::from(first))
    }
}
