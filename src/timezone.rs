//! Named timezone resolution and side-by-side local times
//!
//! Locations are mapped to IANA zones from their coordinates, so the rendered
//! time follows each zone's daylight-saving rules.

use crate::local_time::format_long;
use crate::models::Coordinates;
use crate::{Result, WeatherCheckError};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::OnceLock;
use tracing::debug;
use tzf_rs::DefaultFinder;

static TZF_FINDER: OnceLock<DefaultFinder> = OnceLock::new();

/// How the location's timezone is known
#[derive(Debug, Clone, PartialEq)]
pub enum LocationTimezone {
    /// IANA zone name, e.g. "Asia/Tokyo"
    Named(String),
    /// Resolve the zone from a position
    Coordinates(Coordinates),
}

/// The same instant rendered for the user and for the location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualLocalTimes {
    pub user_time: String,
    pub location_time: String,
    /// IANA name of the location's zone
    pub location_timezone: String,
}

/// Parse an IANA zone name
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| WeatherCheckError::timezone(format!("unknown timezone '{name}'")))
}

/// IANA zone covering `coordinates`
pub fn timezone_for_coordinates(coordinates: &Coordinates) -> Result<Tz> {
    let finder = TZF_FINDER.get_or_init(DefaultFinder::new);
    let name = finder.get_tz_name(coordinates.longitude, coordinates.latitude);
    if name.is_empty() {
        return Err(WeatherCheckError::timezone(format!(
            "no timezone found for {}",
            coordinates.format_coordinates()
        )));
    }
    debug!("Resolved {} to {}", coordinates.format_coordinates(), name);
    parse_timezone(name)
}

/// Timezone of the machine we run on, UTC if undeterminable
#[must_use]
pub fn system_timezone() -> String {
    iana_time_zone::get_timezone()
        .ok()
        .filter(|name| name.parse::<Tz>().is_ok())
        .unwrap_or_else(|| "UTC".to_string())
}

/// Render `now` in both the user's and the location's timezone
pub fn dual_local_times(
    user_timezone: &str,
    location: &LocationTimezone,
    now: DateTime<Utc>,
) -> Result<DualLocalTimes> {
    let user_tz = parse_timezone(user_timezone)?;
    let location_tz = match location {
        LocationTimezone::Named(name) => parse_timezone(name)?,
        LocationTimezone::Coordinates(coordinates) => timezone_for_coordinates(coordinates)?,
    };

    Ok(DualLocalTimes {
        user_time: format_long(&now.with_timezone(&user_tz)),
        location_time: format_long(&now.with_timezone(&location_tz)),
        location_timezone: location_tz.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_named_timezones_follow_dst() {
        let times = dual_local_times(
            "UTC",
            &LocationTimezone::Named("America/New_York".to_string()),
            instant("2025-07-01T16:00:00Z"),
        )
        .unwrap();

        assert_eq!(times.user_time, "Tuesday, July 01, 2025, 04:00 PM");
        assert_eq!(times.location_time, "Tuesday, July 01, 2025, 12:00 PM");
        assert_eq!(times.location_timezone, "America/New_York");

        let winter = dual_local_times(
            "UTC",
            &LocationTimezone::Named("America/New_York".to_string()),
            instant("2025-01-06T16:00:00Z"),
        )
        .unwrap();
        assert_eq!(winter.location_time, "Monday, January 06, 2025, 11:00 AM");
    }

    #[test]
    fn test_location_timezone_from_coordinates() {
        let times = dual_local_times(
            "Asia/Tokyo",
            &LocationTimezone::Coordinates(Coordinates::new(48.8566, 2.3522)),
            instant("2025-01-06T12:00:00Z"),
        )
        .unwrap();

        assert_eq!(times.location_timezone, "Europe/Paris");
        assert_eq!(times.location_time, "Monday, January 06, 2025, 01:00 PM");
        assert_eq!(times.user_time, "Monday, January 06, 2025, 09:00 PM");
    }

    #[test]
    fn test_unknown_user_timezone_is_error() {
        let err = dual_local_times(
            "Mars/Olympus_Mons",
            &LocationTimezone::Named("UTC".to_string()),
            instant("2025-01-06T12:00:00Z"),
        )
        .unwrap_err();

        assert!(matches!(err, WeatherCheckError::TimezoneResolution { .. }));
        assert!(err.user_message().contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn test_unknown_location_timezone_is_error() {
        let err = dual_local_times(
            "UTC",
            &LocationTimezone::Named("Nowhere/Special".to_string()),
            instant("2025-01-06T12:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(err, WeatherCheckError::TimezoneResolution { .. }));
    }

    #[test]
    fn test_system_timezone_is_parseable() {
        assert!(parse_timezone(&system_timezone()).is_ok());
    }
}
