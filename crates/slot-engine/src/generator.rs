//! Slot generation -- expands a [`RecurrenceConfig`] into concrete intervals.
//!
//! Generation is total: incomplete or nonsensical configuration produces an
//! empty list instead of an error, so a half-filled form previews nothing.

use crate::day::DayKey;
use crate::dst::DstPolicy;
use crate::interval::TimeInterval;
use crate::recurrence::RecurrenceConfig;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, trace};

/// Expand `config` into slots, reading calendar days in `tz`.
///
/// Uses [`DstPolicy::ShiftForward`] for local times inside a DST gap.
pub fn generate(config: &RecurrenceConfig, tz: Tz) -> Vec<TimeInterval> {
    generate_with_policy(config, tz, DstPolicy::default())
}

/// Expand `config` into slots with an explicit DST policy.
///
/// Output is sorted ascending by start. Range slots never overlap.
pub fn generate_with_policy(
    config: &RecurrenceConfig,
    tz: Tz,
    policy: DstPolicy,
) -> Vec<TimeInterval> {
    match *config {
        RecurrenceConfig::Single {
            anchor,
            duration_minutes,
        } => anchor
            .and_then(|anchor| TimeInterval::from_duration(anchor, duration_minutes))
            .into_iter()
            .collect(),
        RecurrenceConfig::Range {
            start_boundary: Some(start_boundary),
            end_boundary: Some(end_boundary),
            increment_minutes,
            gap_minutes,
        } => expand_range(
            start_boundary,
            end_boundary,
            increment_minutes,
            gap_minutes,
            tz,
            policy,
        ),
        RecurrenceConfig::Range { .. } => Vec::new(),
    }
}

fn expand_range(
    start_boundary: DateTime<Utc>,
    end_boundary: DateTime<Utc>,
    increment_minutes: i64,
    gap_minutes: i64,
    tz: Tz,
    policy: DstPolicy,
) -> Vec<TimeInterval> {
    if increment_minutes <= 0 {
        return Vec::new();
    }
    // A negative gap would make consecutive slots overlap.
    let Some(step) = increment_minutes
        .checked_add(gap_minutes.max(0))
        .and_then(Duration::try_minutes)
    else {
        debug!(increment_minutes, gap_minutes, "slot step out of range");
        return Vec::new();
    };

    let local_start = start_boundary.with_timezone(&tz).naive_local();
    let local_end = end_boundary.with_timezone(&tz).naive_local();
    let first_day = local_start.date();
    let last_day = local_end.date();

    let mut slots = Vec::new();
    let mut days = 0usize;
    for day in first_day.iter_days().take_while(|d| *d <= last_day) {
        days += 1;
        let Some((day_start, day_end)) =
            daily_window(day, local_start.time(), local_end.time(), tz, policy)
        else {
            trace!(day = %DayKey::from(day), "daily window unresolvable, skipping day");
            continue;
        };

        let mut slot_time = day_start;
        while slot_time <= day_end {
            // `None` when the slot or the next start runs past the calendar.
            let Some(slot) = TimeInterval::from_duration(slot_time, increment_minutes) else {
                break;
            };
            slots.push(slot);
            let Some(next) = slot_time.checked_add_signed(step) else {
                break;
            };
            slot_time = next;
        }
    }

    debug!(days, slots = slots.len(), "expanded range configuration");
    slots
}

/// Resolve the absolute start and end bound of one day's window.
fn daily_window(
    day: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    tz: Tz,
    policy: DstPolicy,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let day_start = policy.resolve(tz, day.and_time(start_time))?;
    let day_end = policy.resolve(tz, day.and_time(end_time))?;
    Some((day_start, day_end))
}
