//! Calendar-day keys and string parsing helpers for the reference timezone.

use std::fmt;

use crate::error::{Result, SlotError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A calendar day in the reference timezone, used to group slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// The calendar day `instant` falls on when viewed in `tz`.
    pub fn of(instant: DateTime<Utc>, tz: Tz) -> Self {
        Self(instant.with_timezone(&tz).date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Parse an IANA timezone name (e.g. "Europe/Berlin").
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Parse an ISO 8601 datetime into an instant.
///
/// Accepts RFC 3339 (with offset) and naive `YYYY-MM-DDTHH:MM[:SS]`, which is
/// read as UTC.
///
/// # Errors
/// Returns `SlotError::InvalidDatetime` if no format matches.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|ndt| ndt.and_utc())
        .ok_or_else(|| SlotError::InvalidDatetime(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_key_follows_reference_timezone() {
        // 23:30 UTC on Jan 1 is already Jan 2 in Berlin (UTC+1).
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();

        assert_eq!(DayKey::of(instant, chrono_tz::UTC).to_string(), "2024-01-01");
        assert_eq!(
            DayKey::of(instant, chrono_tz::Europe::Berlin).to_string(),
            "2024-01-02"
        );
    }

    #[test]
    fn parse_instant_accepts_offset_and_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        assert_eq!(parse_instant("2024-01-01T09:00:00Z").unwrap(), expected);
        assert_eq!(parse_instant("2024-01-01T10:00:00+01:00").unwrap(), expected);
        assert_eq!(parse_instant("2024-01-01T09:00:00").unwrap(), expected);
        assert_eq!(parse_instant("2024-01-01T09:00").unwrap(), expected);
        assert!(matches!(
            parse_instant("next tuesday"),
            Err(SlotError::InvalidDatetime(_))
        ));
    }

    #[test]
    fn parse_timezone_rejects_unknown_names() {
        assert_eq!(parse_timezone("Asia/Tokyo").unwrap(), chrono_tz::Asia::Tokyo);
        assert_eq!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(SlotError::InvalidTimezone("Mars/Olympus_Mons".to_string()))
        );
    }
}
