//! Application session
//!
//! Holds everything one user interaction needs (settings, provider, clock and
//! the user's timezone) and turns every failure into something the
//! presentation layer can display.

use crate::api::{Geocoder, LocationParser, WeatherSource};
use crate::favorites::SettingsStore;
use crate::local_time::{Clock, local_time_at};
use crate::models::{Settings, TemperatureUnit, WeatherRecord};
use crate::timezone::{DualLocalTimes, LocationTimezone, dual_local_times};
use crate::{Result, WeatherCheckError, weather};
use tracing::{debug, info, warn};

/// Local time shown next to a weather report
#[derive(Debug, Clone, PartialEq)]
pub enum LocalTimeDisplay {
    /// Resolved through named timezones
    Zoned(DualLocalTimes),
    /// Derived from the provider's UTC offset
    Offset { location_time: String },
}

impl LocalTimeDisplay {
    #[must_use]
    pub fn location_time(&self) -> &str {
        match self {
            LocalTimeDisplay::Zoned(times) => &times.location_time,
            LocalTimeDisplay::Offset { location_time } => location_time,
        }
    }
}

/// Everything displayed for one lookup
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// Place as entered by the user
    pub query: String,
    pub record: WeatherRecord,
    pub local_time: LocalTimeDisplay,
    /// Whether `query` is already a favorite
    pub is_favorite: bool,
}

/// Result of asking to add a favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added,
    AlreadyPresent,
}

/// One user session
pub struct App<P> {
    provider: P,
    /// `None` once the settings file could not be loaded; it is then left untouched
    store: Option<SettingsStore>,
    settings: Settings,
    clock: Box<dyn Clock>,
    user_timezone: String,
    notices: Vec<String>,
}

impl<P> App<P>
where
    P: Geocoder + WeatherSource,
{
    /// Start a session, falling back to in-memory defaults if settings cannot be loaded
    pub fn new(
        provider: P,
        store: SettingsStore,
        clock: Box<dyn Clock>,
        user_timezone: String,
    ) -> Self {
        let mut notices = Vec::new();
        let (settings, store) = match store.load() {
            Ok(settings) => (settings, Some(store)),
            Err(e) => {
                warn!("Using default settings for this session: {}", e);
                notices.push(e.user_message());
                (Settings::default(), None)
            }
        };

        Self {
            provider,
            store,
            settings,
            clock,
            user_timezone,
            notices,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Drain the non-fatal warnings collected so far
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Look up the weather for `place`, or the default location when none is given.
    ///
    /// `display_unit` converts the result locally instead of re-querying.
    pub fn check_weather(
        &mut self,
        place: Option<&str>,
        display_unit: Option<TemperatureUnit>,
    ) -> Result<WeatherReport> {
        let query = place
            .map(str::to_string)
            .or_else(|| self.settings.default_location.clone())
            .unwrap_or_default();
        let input = LocationParser::parse(&query)?;
        let query = query.trim().to_string();

        info!("Checking weather for '{}'", query);
        let units = self.settings.temperature_unit.units();
        let record = weather::lookup(&self.provider, &input, units)?;
        let record = match display_unit {
            Some(unit) => record.in_unit(unit),
            None => record,
        };

        let local_time = self.local_time_for(&record);
        let is_favorite = self.settings.favorites.contains(&query);

        Ok(WeatherReport {
            query,
            record,
            local_time,
            is_favorite,
        })
    }

    /// Look up the favorite at a one-based position
    pub fn check_favorite(
        &mut self,
        position: usize,
        display_unit: Option<TemperatureUnit>,
    ) -> Result<WeatherReport> {
        let name = position
            .checked_sub(1)
            .and_then(|index| self.settings.favorites.get(index))
            .map(str::to_string)
            .ok_or_else(|| {
                WeatherCheckError::validation(format!("There is no favorite number {position}."))
            })?;
        self.check_weather(Some(&name), display_unit)
    }

    fn local_time_for(&mut self, record: &WeatherRecord) -> LocalTimeDisplay {
        let now = self.clock.now();
        match dual_local_times(
            &self.user_timezone,
            &LocationTimezone::Coordinates(record.coordinates),
            now,
        ) {
            Ok(times) => LocalTimeDisplay::Zoned(times),
            Err(e) => {
                warn!("Falling back to UTC offset for local time: {}", e);
                self.notices.push(e.user_message());
                LocalTimeDisplay::Offset {
                    location_time: local_time_at(record.utc_offset_seconds, now),
                }
            }
        }
    }

    /// Add `place` to the favorites
    pub fn add_favorite(&mut self, place: &str) -> Result<FavoriteOutcome> {
        let place = place.trim();
        if place.is_empty() {
            return Err(WeatherCheckError::validation("Please enter a city name."));
        }
        if self.settings.favorites.contains(place) {
            return Ok(FavoriteOutcome::AlreadyPresent);
        }

        self.persist(
            |store, settings| store.add_favorite(settings, place),
            |settings| {
                settings.favorites.add(place);
            },
        );
        Ok(FavoriteOutcome::Added)
    }

    /// Remove `place` from the favorites, returning whether it was present
    pub fn remove_favorite(&mut self, place: &str) -> bool {
        let place = place.trim();
        if !self.settings.favorites.contains(place) {
            return false;
        }
        self.persist(
            |store, settings| store.remove_favorite(settings, place),
            |settings| {
                settings.favorites.remove(place);
            },
        );
        true
    }

    pub fn set_default_location(&mut self, place: Option<String>) {
        let place = place.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        let in_memory = place.clone();
        self.persist(
            |store, settings| store.set_default_location(settings, place),
            |settings| settings.default_location = in_memory,
        );
    }

    pub fn set_temperature_unit(&mut self, unit: TemperatureUnit) {
        self.persist(
            |store, settings| store.set_temperature_unit(settings, unit),
            |settings| settings.temperature_unit = unit,
        );
    }

    /// Run a store operation; on failure, or when the store is disabled, apply
    /// the same change in memory only
    fn persist(
        &mut self,
        stored: impl FnOnce(&SettingsStore, Settings) -> Result<Settings>,
        in_memory: impl FnOnce(&mut Settings),
    ) {
        let Some(store) = &self.store else {
            debug!("Settings store disabled, keeping change in memory");
            in_memory(&mut self.settings);
            return;
        };

        match stored(store, self.settings.clone()) {
            Ok(settings) => self.settings = settings,
            Err(e) => {
                warn!("Keeping settings change in memory only: {}", e);
                self.notices.push(e.user_message());
                in_memory(&mut self.settings);
            }
        }
    }
}
