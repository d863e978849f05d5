//! Persisted settings and favorites
//!
//! The whole settings record is read or rewritten on every access; there are
//! no partial updates.

use crate::models::{Settings, TemperatureUnit};
use crate::{Result, WeatherCheckError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};

/// JSON file holding the user's [`Settings`]
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    /// Held for each read-modify-write of the settings file
    write_lock: Mutex<()>,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings, creating and persisting defaults when the file is absent
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Settings> {
        if let Some(settings) = self.read()? {
            debug!("Loaded {} favorites", settings.favorites.len());
            return Ok(settings);
        }

        info!("No settings file found, writing defaults");
        let settings = Settings::default();
        self.save(&settings)?;
        Ok(settings)
    }

    /// Write the full settings record
    #[instrument(skip(self, settings), fields(path = %self.path.display()))]
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let _guard = self.lock()?;
        self.write(settings)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| WeatherCheckError::persistence("settings lock poisoned"))
    }

    /// Current file contents, `None` if there is no file yet
    fn read(&self) -> Result<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            WeatherCheckError::persistence(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let settings = serde_json::from_str(&contents).map_err(|e| {
            WeatherCheckError::persistence(format!("cannot parse {}: {e}", self.path.display()))
        })?;
        Ok(Some(settings))
    }

    fn write(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                WeatherCheckError::persistence(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| WeatherCheckError::persistence(e.to_string()))?;
        fs::write(&self.path, json + "\n").map_err(|e| {
            WeatherCheckError::persistence(format!("cannot write {}: {e}", self.path.display()))
        })
    }

    /// Read-modify-write under the lock.
    ///
    /// `change` is applied to the file's current contents; `settings` is only
    /// the starting point when no file exists yet. An unreadable file is an
    /// error and is never overwritten.
    fn update(
        &self,
        settings: Settings,
        change: impl FnOnce(&mut Settings) -> bool,
    ) -> Result<Settings> {
        let _guard = self.lock()?;
        let mut current = self.read()?.unwrap_or(settings);
        if change(&mut current) {
            self.write(&current)?;
        }
        Ok(current)
    }

    /// Append a favorite, evicting the oldest when full; unchanged if already present
    pub fn add_favorite(&self, settings: Settings, place_name: &str) -> Result<Settings> {
        self.update(settings, |s| s.favorites.add(place_name))
    }

    /// Remove a favorite; unchanged if absent
    pub fn remove_favorite(&self, settings: Settings, place_name: &str) -> Result<Settings> {
        self.update(settings, |s| s.favorites.remove(place_name))
    }

    pub fn set_default_location(
        &self,
        settings: Settings,
        default_location: Option<String>,
    ) -> Result<Settings> {
        self.update(settings, |s| {
            let changed = s.default_location != default_location;
            s.default_location = default_location;
            changed
        })
    }

    pub fn set_temperature_unit(
        &self,
        settings: Settings,
        unit: TemperatureUnit,
    ) -> Result<Settings> {
        self.update(settings, |s| {
            let changed = s.temperature_unit != unit;
            s.temperature_unit = unit;
            changed
        })
    }
}
