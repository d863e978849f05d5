//! Weather record model, units and display methods

use serde::{Deserialize, Serialize};

use super::location::Coordinates;

/// Base URL for provider condition icons
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Unit symbol for display
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Provider unit system that yields temperatures in this unit
    #[must_use]
    pub fn units(self) -> Units {
        match self {
            TemperatureUnit::Celsius => Units::Metric,
            TemperatureUnit::Fahrenheit => Units::Imperial,
        }
    }
}

/// Unit system requested from the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the provider's `units` query parameter
    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Temperature unit the provider answers with
    #[must_use]
    pub fn temperature_unit(self) -> TemperatureUnit {
        match self {
            Units::Metric => TemperatureUnit::Celsius,
            Units::Imperial => TemperatureUnit::Fahrenheit,
        }
    }
}

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert Celsius to Fahrenheit, rounded to two decimals
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round2(celsius * 9.0 / 5.0 + 32.0)
}

/// Convert Fahrenheit to Celsius, rounded to two decimals
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    round2((fahrenheit - 32.0) * 5.0 / 9.0)
}

/// Current conditions for one place, normalized from the provider response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherRecord {
    /// Temperature expressed in `unit`
    pub temperature: f64,
    /// Unit of `temperature`
    pub unit: TemperatureUnit,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Condition text of the first reported weather condition
    pub description: String,
    /// Signed offset from UTC in seconds at the time of the query
    pub utc_offset_seconds: i32,
    /// Canonical city name as returned by the provider
    pub resolved_city: String,
    /// Country code as returned by the provider
    pub resolved_country: String,
    /// Condition icon identifier
    pub icon_code: Option<String>,
    /// Provider's position for the place
    pub coordinates: Coordinates,
}

impl WeatherRecord {
    /// Return a copy with the temperature expressed in `unit`
    #[must_use]
    pub fn in_unit(&self, unit: TemperatureUnit) -> Self {
        let temperature = match (self.unit, unit) {
            (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => {
                celsius_to_fahrenheit(self.temperature)
            }
            (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => {
                fahrenheit_to_celsius(self.temperature)
            }
            _ => self.temperature,
        };
        Self {
            temperature,
            unit,
            ..self.clone()
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}{}", self.temperature, self.unit.symbol())
    }

    /// Format humidity with unit
    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{}%", self.humidity)
    }

    /// Description with its first letter capitalized
    #[must_use]
    pub fn display_description(&self) -> String {
        let mut chars = self.description.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// "City, CC" label
    #[must_use]
    pub fn place_label(&self) -> String {
        if self.resolved_country.is_empty() {
            self.resolved_city.clone()
        } else {
            format!("{}, {}", self.resolved_city, self.resolved_country)
        }
    }

    /// Image URL of the condition icon, if the provider sent one
    #[must_use]
    pub fn icon_url(&self) -> Option<String> {
        self.icon_code
            .as_ref()
            .map(|code| format!("{ICON_BASE_URL}/{code}@2x.png"))
    }
}
