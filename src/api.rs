//! Weather API client for OpenWeatherMap
//!
//! This module provides the blocking HTTP client used for geocoding and
//! current-weather lookups, the provider traits the rest of the crate is
//! written against, and parsing of free-text location input.

use crate::config::WeatherCheckConfig;
use crate::models::{Coordinates, Units, WeatherRecord};
use crate::{Result, WeatherCheckError};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Looks up coordinates for a place name
pub trait Geocoder {
    /// Return at most `limit` matches for `place`, best first
    fn geocode(&self, place: &str, limit: u8) -> Result<Vec<GeocodingResult>>;
}

/// Fetches current conditions
pub trait WeatherSource {
    /// Current weather for `query` with temperatures in `units`
    fn current_weather(&self, query: &WeatherQuery, units: Units) -> Result<WeatherRecord>;
}

/// What to ask the weather provider for
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    /// Provider-side name search
    Place(String),
    /// Exact position
    Coordinates(Coordinates),
}

impl WeatherQuery {
    fn to_query_string(&self) -> String {
        match self {
            WeatherQuery::Place(name) => format!("q={}", urlencoding::encode(name)),
            WeatherQuery::Coordinates(c) => format!("lat={}&lon={}", c.latitude, c.longitude),
        }
    }

    fn label(&self) -> String {
        match self {
            WeatherQuery::Place(name) => name.clone(),
            WeatherQuery::Coordinates(c) => c.format_coordinates(),
        }
    }
}

/// Weather API client for OpenWeatherMap
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    api_key: Option<String>,
    geo_base_url: String,
    weather_base_url: String,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: &WeatherCheckConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.provider.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weather-checker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherCheckError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.provider.api_key.clone(),
            geo_base_url: config.provider.geo_base_url.trim_end_matches('/').to_string(),
            weather_base_url: config
                .provider
                .weather_base_url
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            WeatherCheckError::config(
                "no API key configured; set provider.api_key or WEATHERCHECK_PROVIDER__API_KEY",
            )
        })
    }

    /// Issue a single GET; non-success statuses other than 401 become `PlaceNotFound`
    #[instrument(skip(self, url, place))]
    fn make_request(&self, endpoint: &str, url: &str, place: &str) -> Result<Response> {
        let start = Instant::now();
        let response = self.client.get(url).send().map_err(|e| {
            let err = WeatherCheckError::from(e);
            warn!("Network error calling {}: {}", endpoint, err);
            err
        })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start.elapsed().as_secs_f64()
        );

        if status.is_success() {
            Ok(response)
        } else if status == StatusCode::UNAUTHORIZED {
            warn!("API authentication failed (HTTP 401)");
            Err(WeatherCheckError::config("the provider rejected the API key"))
        } else {
            warn!("Lookup for '{}' failed with status {}", place, status);
            Err(WeatherCheckError::place_not_found(place))
        }
    }
}

impl Geocoder for WeatherApiClient {
    #[instrument(skip(self))]
    fn geocode(&self, place: &str, limit: u8) -> Result<Vec<GeocodingResult>> {
        info!("Geocoding location: '{}'", place);

        let url = format!(
            "{}/direct?q={}&limit={}&appid={}",
            self.geo_base_url,
            urlencoding::encode(place),
            limit,
            self.api_key()?
        );

        let response = self.make_request("geocode", &url, place)?;
        let results: Vec<GeocodingResult> = response.json()?;

        if results.is_empty() {
            warn!("No results found for location '{}'", place);
        } else {
            debug!(
                "Geocoding results: {:?}",
                results
                    .iter()
                    .map(|r| format!("{} ({:.4}, {:.4})", r.name, r.lat, r.lon))
                    .collect::<Vec<_>>()
            );
        }

        Ok(results)
    }
}

impl WeatherSource for WeatherApiClient {
    #[instrument(skip(self))]
    fn current_weather(&self, query: &WeatherQuery, units: Units) -> Result<WeatherRecord> {
        let start = Instant::now();
        let url = format!(
            "{}/weather?{}&units={}&appid={}",
            self.weather_base_url,
            query.to_query_string(),
            units.as_query(),
            self.api_key()?
        );

        let response = self.make_request("weather", &url, &query.label())?;
        let body: owm::CurrentWeatherResponse = response.json()?;
        let record = body.into_record(units);

        info!(
            "Retrieved weather for {} in {:.3}s",
            record.place_label(),
            start.elapsed().as_secs_f64()
        );
        Ok(record)
    }
}

/// Geocoding result from the OpenWeatherMap direct geocoding API
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GeocodingResult {
    /// Location name
    pub name: String,
    /// Local names in different languages
    pub local_names: Option<std::collections::HashMap<String, String>>,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Country code
    #[serde(default)]
    pub country: String,
    /// State (for some countries)
    pub state: Option<String>,
}

impl From<&GeocodingResult> for Coordinates {
    fn from(geocoding: &GeocodingResult) -> Self {
        Coordinates::new(geocoding.lat, geocoding.lon)
    }
}

/// Current weather response structures
mod owm {
    use super::{Coordinates, Units, WeatherRecord};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherResponse {
        pub coord: Coord,
        #[serde(default)]
        pub weather: Vec<Condition>,
        pub main: Main,
        /// Shift in seconds from UTC
        #[serde(default)]
        pub timezone: i32,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub sys: Sys,
    }

    #[derive(Debug, Deserialize)]
    pub struct Coord {
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub description: String,
        pub icon: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Main {
        pub temp: f64,
        pub humidity: u8,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Sys {
        #[serde(default)]
        pub country: String,
    }

    impl CurrentWeatherResponse {
        pub fn into_record(self, units: Units) -> WeatherRecord {
            let (description, icon_code) = self
                .weather
                .into_iter()
                .next()
                .map(|c| (c.description, c.icon))
                .unwrap_or_default();

            WeatherRecord {
                temperature: self.main.temp,
                unit: units.temperature_unit(),
                humidity: self.main.humidity,
                description,
                utc_offset_seconds: self.timezone,
                resolved_city: self.name,
                resolved_country: self.sys.country,
                icon_code,
                coordinates: Coordinates::new(self.coord.lat, self.coord.lon),
            }
        }
    }
}

/// Location parsing utilities
pub struct LocationParser;

impl LocationParser {
    /// Parse location input (coordinates or place names)
    pub fn parse(input: &str) -> Result<LocationInput> {
        let input = input.trim();
        if input.is_empty() {
            return Err(WeatherCheckError::validation("Please enter a city name."));
        }

        if let Some(coordinates) = Self::parse_coordinates(input) {
            return Ok(LocationInput::Coordinates(coordinates));
        }

        Ok(LocationInput::Name(input.to_string()))
    }

    /// Parse coordinates from string like "46.8182,8.2275" or "46.8182 8.2275"
    fn parse_coordinates(input: &str) -> Option<Coordinates> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        let [lat, lon] = parts.as_slice() else {
            return None;
        };

        let coordinates = Coordinates::new(lat.parse().ok()?, lon.parse().ok()?);
        coordinates.is_valid().then_some(coordinates)
    }
}

/// Types of location input
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Coordinates entered directly
    Coordinates(Coordinates),
    /// Location name (city, region, etc.)
    Name(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureUnit;

    #[test]
    fn test_location_parser_coordinates() {
        assert_eq!(
            LocationParser::parse("46.8182,8.2275").unwrap(),
            LocationInput::Coordinates(Coordinates::new(46.8182, 8.2275))
        );
        assert_eq!(
            LocationParser::parse("46.8182 8.2275").unwrap(),
            LocationInput::Coordinates(Coordinates::new(46.8182, 8.2275))
        );
        assert_eq!(
            LocationParser::parse("-46.8182, -8.2275").unwrap(),
            LocationInput::Coordinates(Coordinates::new(-46.8182, -8.2275))
        );
    }

    #[test]
    fn test_location_parser_out_of_range_is_name() {
        assert!(matches!(
            LocationParser::parse("91.0,8.0").unwrap(),
            LocationInput::Name(_)
        ));
        assert!(matches!(
            LocationParser::parse("46.0,-181.0").unwrap(),
            LocationInput::Name(_)
        ));
        assert!(matches!(
            LocationParser::parse("46.0,8.0,0.0").unwrap(),
            LocationInput::Name(_)
        ));
    }

    #[test]
    fn test_location_parser_names() {
        assert_eq!(
            LocationParser::parse("  New York City ").unwrap(),
            LocationInput::Name("New York City".to_string())
        );
        assert!(matches!(
            LocationParser::parse("Chamonix-Mont-Blanc").unwrap(),
            LocationInput::Name(_)
        ));
    }

    #[test]
    fn test_location_parser_empty() {
        let err = LocationParser::parse("   ").unwrap_err();
        assert!(matches!(err, WeatherCheckError::Validation { .. }));
    }

    #[test]
    fn test_weather_query_strings() {
        assert_eq!(
            WeatherQuery::Place("São Paulo".to_string()).to_query_string(),
            "q=S%C3%A3o%20Paulo"
        );
        assert_eq!(
            WeatherQuery::Coordinates(Coordinates::new(51.5, -0.12)).to_query_string(),
            "lat=51.5&lon=-0.12"
        );
    }

    #[test]
    fn test_current_weather_response_into_record() {
        let json = r#"{
            "coord": {"lon": -0.1257, "lat": 51.5085},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 11.72, "feels_like": 11.0, "humidity": 87, "pressure": 1012},
            "timezone": 3600,
            "sys": {"country": "GB"},
            "name": "London",
            "cod": 200
        }"#;
        let response: owm::CurrentWeatherResponse = serde_json::from_str(json).unwrap();
        let record = response.into_record(Units::Metric);

        assert_eq!(record.temperature, 11.72);
        assert_eq!(record.unit, TemperatureUnit::Celsius);
        assert_eq!(record.humidity, 87);
        assert_eq!(record.description, "light rain");
        assert_eq!(record.icon_code.as_deref(), Some("10d"));
        assert_eq!(record.utc_offset_seconds, 3600);
        assert_eq!(record.place_label(), "London, GB");
        assert_eq!(record.coordinates, Coordinates::new(51.5085, -0.1257));
    }

    #[test]
    fn test_geocoding_result_to_coordinates() {
        let geocoding: Vec<GeocodingResult> = serde_json::from_str(
            r#"[{"name": "Interlaken", "lat": 46.6863, "lon": 7.8632, "country": "CH", "state": "Bern"}]"#,
        )
        .unwrap();

        let coordinates = Coordinates::from(&geocoding[0]);
        assert_eq!(coordinates, Coordinates::new(46.6863, 7.8632));
    }
}
