//! Current weather lookups
//!
//! Coordinates are the canonical way to query the provider since they
//! disambiguate place names. The provider's own name search is used only when
//! geocoding is unreachable.

use crate::api::{Geocoder, LocationInput, WeatherQuery, WeatherSource};
use crate::location_resolver::LocationResolver;
use crate::models::{Units, WeatherRecord};
use crate::{Result, WeatherCheckError};
use tracing::{instrument, warn};

/// Fetch current weather for an explicit query
pub fn fetch(
    source: &impl WeatherSource,
    query: &WeatherQuery,
    units: Units,
) -> Result<WeatherRecord> {
    source.current_weather(query, units)
}

/// Resolve `input` to coordinates and fetch the weather there.
///
/// A place unknown to the geocoder is `PlaceNotFound` without any weather
/// request being made.
#[instrument(skip(provider))]
pub fn lookup<P>(provider: &P, input: &LocationInput, units: Units) -> Result<WeatherRecord>
where
    P: Geocoder + WeatherSource,
{
    let query = match LocationResolver::resolve_input(provider, input) {
        Ok(coordinates) => WeatherQuery::Coordinates(coordinates),
        Err(WeatherCheckError::Transport { message }) => {
            let LocationInput::Name(name) = input else {
                return Err(WeatherCheckError::transport(message));
            };
            warn!(
                "Geocoding unavailable ({}), falling back to name search for '{}'",
                message, name
            );
            WeatherQuery::Place(name.clone())
        }
        Err(e) => return Err(e),
    };

    fetch(provider, &query, units)
}
