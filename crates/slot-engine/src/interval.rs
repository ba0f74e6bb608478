//! A single bookable slot: a half-open `[start, end)` time window.

use crate::error::{Result, SlotError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One bookable time window. `start` strictly precedes `end`.
///
/// Two intervals with the same `start` are treated as the same slot when
/// merging, regardless of their `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = SlotError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        TimeInterval::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    /// Build an interval, rejecting empty or inverted ranges.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` if `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build an interval of `minutes` length starting at `start`.
    ///
    /// Returns `None` for a non-positive length, or when the end would fall
    /// outside the representable calendar.
    pub fn from_duration(start: DateTime<Utc>, minutes: i64) -> Option<Self> {
        if minutes <= 0 {
            return None;
        }
        let end = start.checked_add_signed(Duration::try_minutes(minutes)?)?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}
