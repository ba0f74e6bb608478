//! Compact descriptions of how to expand into concrete slots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a set of slots is described before generation.
///
/// Boundaries are optional because configurations are built incrementally in
/// the admin UI; a missing boundary generates nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RecurrenceConfig {
    /// Exactly one slot of `duration_minutes` starting at `anchor`.
    Single {
        #[serde(default)]
        anchor: Option<DateTime<Utc>>,
        duration_minutes: i64,
    },
    /// Slots on every day from `start_boundary`'s day to `end_boundary`'s day.
    ///
    /// Each day runs from `start_boundary`'s time-of-day up to (and including a
    /// slot starting exactly at) `end_boundary`'s time-of-day. Consecutive
    /// slot starts are `increment_minutes + gap_minutes` apart.
    Range {
        #[serde(default)]
        start_boundary: Option<DateTime<Utc>>,
        #[serde(default)]
        end_boundary: Option<DateTime<Utc>>,
        increment_minutes: i64,
        #[serde(default)]
        gap_minutes: i64,
    },
}

impl RecurrenceConfig {
    pub fn single(anchor: DateTime<Utc>, duration_minutes: i64) -> Self {
        Self::Single {
            anchor: Some(anchor),
            duration_minutes,
        }
    }

    pub fn range(
        start_boundary: DateTime<Utc>,
        end_boundary: DateTime<Utc>,
        increment_minutes: i64,
        gap_minutes: i64,
    ) -> Self {
        Self::Range {
            start_boundary: Some(start_boundary),
            end_boundary: Some(end_boundary),
            increment_minutes,
            gap_minutes,
        }
    }
}
