//! Destination wall-clock time from a fixed UTC offset

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Long human-readable pattern, e.g. "Monday, January 06, 2025, 03:04 PM"
pub const LONG_FORMAT: &str = "%A, %B %d, %Y, %I:%M %p";

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Format any zoned instant with [`LONG_FORMAT`]
#[must_use]
pub fn format_long<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format(LONG_FORMAT).to_string()
}

/// Wall-clock time at a place `utc_offset_seconds` away from UTC.
///
/// Does not follow daylight-saving changes after the offset was observed.
#[must_use]
pub fn local_time_at(utc_offset_seconds: i32, now_utc: DateTime<Utc>) -> String {
    let shifted = now_utc + Duration::seconds(i64::from(utc_offset_seconds));
    // The shifted instant is rendered as if it were UTC wall time.
    format_long(&shifted)
}
