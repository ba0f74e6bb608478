//! DST transition policies for resolving local wall-clock times.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Policy for local times that fall in or around a DST transition.
///
/// Ambiguous times (a repeated hour when clocks fall back) always resolve to
/// the earlier instant. The policies differ only for nonexistent times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DstPolicy {
    /// Shift nonexistent times forward by the length of the gap
    /// (02:30 during a one-hour spring-forward becomes 03:30).
    #[default]
    ShiftForward,
    /// Treat nonexistent times as unresolvable.
    Skip,
}

impl DstPolicy {
    /// Resolve a local wall-clock time in `tz` to an instant.
    ///
    /// Returns `None` only under `Skip` for a time inside a DST gap.
    pub fn resolve(self, tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            LocalResult::None => match self {
                DstPolicy::Skip => None,
                DstPolicy::ShiftForward => {
                    // Read the wall time with the offset in force before the gap.
                    let before = local.checked_sub_signed(Duration::days(1))?;
                    let offset = tz
                        .offset_from_local_datetime(&before)
                        .earliest()?
                        .fix()
                        .local_minus_utc();
                    local
                        .checked_sub_signed(Duration::seconds(i64::from(offset)))
                        .map(|utc| utc.and_utc())
                }
            },
        }
    }
}
