//! The canonical, sorted, start-unique set of slots held by a caller.

use std::collections::{BTreeMap, HashMap};

use crate::day::DayKey;
use crate::interval::TimeInterval;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Slots sorted ascending by start, with no two slots sharing a start.
///
/// Collections are values: every operation returns a new collection and the
/// caller replaces the one it holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TimeInterval>", into = "Vec<TimeInterval>")]
pub struct SlotCollection {
    slots: Vec<TimeInterval>,
}

impl SlotCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize arbitrary intervals into a collection.
    ///
    /// When several intervals share a start, the one appearing last wins.
    pub fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = TimeInterval>,
    {
        // Record the final position of each start, then keep only entries
        // sitting at their start's final position.
        let combined: Vec<TimeInterval> = intervals.into_iter().collect();
        let mut last_index: HashMap<DateTime<Utc>, usize> = HashMap::with_capacity(combined.len());
        for (i, slot) in combined.iter().enumerate() {
            last_index.insert(slot.start(), i);
        }

        let mut slots: Vec<TimeInterval> = combined
            .into_iter()
            .enumerate()
            .filter(|(i, slot)| last_index.get(&slot.start()) == Some(i))
            .map(|(_, slot)| slot)
            .collect();
        slots.sort_by_key(|slot| slot.start());

        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeInterval> {
        self.slots.iter()
    }

    pub fn as_slice(&self) -> &[TimeInterval] {
        &self.slots
    }

    pub fn into_vec(self) -> Vec<TimeInterval> {
        self.slots
    }

    /// The slot starting exactly at `start`, if any.
    pub fn get(&self, start: DateTime<Utc>) -> Option<&TimeInterval> {
        self.slots
            .binary_search_by_key(&start, |slot| slot.start())
            .ok()
            .map(|i| &self.slots[i])
    }

    /// A copy of this collection without the slot starting at `start`.
    pub fn without(&self, start: DateTime<Utc>) -> Self {
        Self {
            slots: self
                .slots
                .iter()
                .filter(|slot| slot.start() != start)
                .copied()
                .collect(),
        }
    }

    /// Slots grouped by their calendar day in `tz`, each group in start order.
    pub fn group_by_day(&self, tz: Tz) -> BTreeMap<DayKey, Vec<TimeInterval>> {
        let mut days: BTreeMap<DayKey, Vec<TimeInterval>> = BTreeMap::new();
        for slot in &self.slots {
            days.entry(DayKey::of(slot.start(), tz))
                .or_default()
                .push(*slot);
        }
        days
    }
}

impl From<Vec<TimeInterval>> for SlotCollection {
    fn from(intervals: Vec<TimeInterval>) -> Self {
        Self::from_intervals(intervals)
    }
}

impl From<SlotCollection> for Vec<TimeInterval> {
    fn from(collection: SlotCollection) -> Self {
        collection.slots
    }
}

impl FromIterator<TimeInterval> for SlotCollection {
    fn from_iter<I: IntoIterator<Item = TimeInterval>>(iter: I) -> Self {
        Self::from_intervals(iter)
    }
}

impl<'a> IntoIterator for &'a SlotCollection {
    type Item = &'a TimeInterval;
    type IntoIter = std::slice::Iter<'a, TimeInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl IntoIterator for SlotCollection {
    type Item = TimeInterval;
    type IntoIter = std::vec::IntoIter<TimeInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}
