//! Detect overlapping slots inside a collection.
//!
//! Merging keeps saved slots that start before a day's affected range, so one
//! of them can still run into the first new slot. Adjacent slots (one ends
//! exactly when the next starts) are NOT overlaps.

use crate::collection::SlotCollection;
use crate::interval::TimeInterval;
use serde::{Deserialize, Serialize};

/// Two slots whose time ranges intersect. `earlier.start < later.start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    pub earlier: TimeInterval,
    pub later: TimeInterval,
    pub overlap_minutes: i64,
}

/// Find every pair of overlapping slots in `collection`.
///
/// The collection is sorted by start, so the scan for each slot stops at the
/// first later slot starting at or after its end.
pub fn find_overlaps(collection: &SlotCollection) -> Vec<Overlap> {
    let slots = collection.as_slice();
    let mut overlaps = Vec::new();

    for (i, a) in slots.iter().enumerate() {
        for b in slots[i + 1..].iter().take_while(|b| b.start() < a.end()) {
            let overlap_end = a.end().min(b.end());
            overlaps.push(Overlap {
                earlier: *a,
                later: *b,
                overlap_minutes: (overlap_end - b.start()).num_minutes(),
            });
        }
    }

    overlaps
}
