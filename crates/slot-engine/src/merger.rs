//! Fold freshly generated slots into a previously saved collection.
//!
//! For every day the incoming slots touch, the span from that day's earliest
//! incoming start to its latest incoming end is the *affected range*. Saved
//! slots starting inside an affected range are superseded; everything else
//! survives untouched.

use std::collections::BTreeMap;

use crate::collection::SlotCollection;
use crate::day::DayKey;
use crate::interval::TimeInterval;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The span of one day covered by an incoming generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedRange {
    /// Earliest incoming start on the day.
    pub min: DateTime<Utc>,
    /// Latest incoming end on the day.
    pub max: DateTime<Utc>,
}

impl AffectedRange {
    /// Whether a saved slot starting at `start` is superseded. Half-open.
    pub fn supersedes(&self, start: DateTime<Utc>) -> bool {
        self.min <= start && start < self.max
    }
}

/// Compute the affected range of every day `incoming` touches.
pub fn affected_ranges(incoming: &[TimeInterval], tz: Tz) -> BTreeMap<DayKey, AffectedRange> {
    let mut ranges: BTreeMap<DayKey, AffectedRange> = BTreeMap::new();
    for slot in incoming {
        ranges
            .entry(DayKey::of(slot.start(), tz))
            .and_modify(|range| {
                range.min = range.min.min(slot.start());
                range.max = range.max.max(slot.end());
            })
            .or_insert(AffectedRange {
                min: slot.start(),
                max: slot.end(),
            });
    }
    ranges
}

/// Merge `incoming` into `existing`, grouping days in `tz`.
///
/// Saved slots inside an affected range are dropped, the survivors are
/// followed by `incoming`, and the result is deduplicated by start (later
/// entries win) and sorted. An empty `incoming` returns `existing` as is.
pub fn merge(existing: &SlotCollection, incoming: &[TimeInterval], tz: Tz) -> SlotCollection {
    if incoming.is_empty() {
        return existing.clone();
    }

    let ranges = affected_ranges(incoming, tz);

    let survivors: Vec<TimeInterval> = existing
        .iter()
        .filter(|slot| {
            !ranges
                .get(&DayKey::of(slot.start(), tz))
                .is_some_and(|range| range.supersedes(slot.start()))
        })
        .copied()
        .collect();

    debug!(
        days = ranges.len(),
        superseded = existing.len() - survivors.len(),
        incoming = incoming.len(),
        "merging generated slots"
    );

    SlotCollection::from_intervals(survivors.into_iter().chain(incoming.iter().copied()))
}
