//! Property-based tests for slot generation and merging using proptest.
//!
//! These verify invariants that should hold for *any* configuration, not just
//! the examples in `generator_tests.rs` and `merger_tests.rs`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;
use slot_engine::{generate, merge, DayKey, RecurrenceConfig, SlotCollection, TimeInterval};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_timezone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(chrono_tz::UTC),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::Europe::London),
        Just(chrono_tz::Asia::Tokyo),
        Just(chrono_tz::Asia::Kolkata),
    ]
}

/// An instant in 2025-2027 on a quarter-hour boundary.
/// Day is capped at 28 to avoid invalid month/day combos.
fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (2025i32..=2027, 1u32..=12, 1u32..=28, 0u32..=23, 0u32..4).prop_map(|(y, mo, d, h, q)| {
        Utc.with_ymd_and_hms(y, mo, d, h, q * 15, 0).unwrap()
    })
}

/// A range configuration spanning at most a week.
fn arb_range() -> impl Strategy<Value = (DateTime<Utc>, RecurrenceConfig)> {
    (arb_instant(), 0i64..=6, 0i64..=12 * 60, 5i64..=120, 0i64..=30).prop_map(
        |(start, extra_days, extra_minutes, increment, gap)| {
            let end = start + Duration::days(extra_days) + Duration::minutes(extra_minutes);
            (start, RecurrenceConfig::range(start, end, increment, gap))
        },
    )
}

fn arb_interval() -> impl Strategy<Value = TimeInterval> {
    (arb_instant(), 5i64..=180)
        .prop_map(|(start, minutes)| TimeInterval::from_duration(start, minutes).unwrap())
}

fn arb_collection() -> impl Strategy<Value = SlotCollection> {
    prop::collection::vec(arb_interval(), 0..40).prop_map(SlotCollection::from_intervals)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

fn assert_canonical(collection: &SlotCollection) -> Result<(), TestCaseError> {
    for pair in collection.as_slice().windows(2) {
        prop_assert!(
            pair[0].start() < pair[1].start(),
            "not strictly ascending: {:?} then {:?}",
            pair[0].start(),
            pair[1].start()
        );
    }
    for slot in collection {
        prop_assert!(slot.start() < slot.end());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Property 1: Single mode yields exactly [anchor, anchor + duration)
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn single_mode_is_exact(anchor in arb_instant(), minutes in 1i64..=600, tz in arb_timezone()) {
        let slots = generate(&RecurrenceConfig::single(anchor, minutes), tz);

        prop_assert_eq!(slots.len(), 1);
        prop_assert_eq!(slots[0].start(), anchor);
        prop_assert_eq!(slots[0].end(), anchor + Duration::minutes(minutes));
    }
}

// ---------------------------------------------------------------------------
// Property 2: Range output is sorted and same-day slots keep the gap
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn range_slots_are_sorted_and_spaced((_, range) in arb_range(), tz in arb_timezone()) {
        let RecurrenceConfig::Range { gap_minutes, increment_minutes, .. } = range else {
            unreachable!("arb_range only builds ranges");
        };
        let slots = generate(&range, tz);

        for pair in slots.windows(2) {
            prop_assert!(pair[0].start() < pair[1].start());
            if DayKey::of(pair[0].start(), tz) == DayKey::of(pair[1].start(), tz) {
                prop_assert!(
                    pair[0].end() + Duration::minutes(gap_minutes) <= pair[1].start(),
                    "slots overlap: {:?} and {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
        for slot in &slots {
            prop_assert_eq!(slot.duration_minutes(), increment_minutes);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: In UTC, slots per day = floor(window / step) + 1
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn utc_slot_count_matches_window(
        start in arb_instant(),
        days in 0i64..=6,
        window in 0i64..=10 * 60,
        increment in 5i64..=120,
        gap in 0i64..=30,
    ) {
        // Keep the daily window inside one calendar day.
        let day_start = start.date_naive().and_hms_opt(8, 0, 0).unwrap().and_utc();
        let day_end = day_start + Duration::minutes(window);
        let config = RecurrenceConfig::range(day_start, day_end + Duration::days(days), increment, gap);

        let slots = generate(&config, chrono_tz::UTC);

        let per_day = window / (increment + gap) + 1;
        prop_assert_eq!(slots.len() as i64, per_day * (days + 1));
    }
}

// ---------------------------------------------------------------------------
// Property 4: Merge output is canonical for any inputs
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merge_output_is_canonical(
        existing in arb_collection(),
        incoming in prop::collection::vec(arb_interval(), 0..40),
        tz in arb_timezone(),
    ) {
        let merged = merge(&existing, &incoming, tz);
        assert_canonical(&merged)?;

        // Every incoming start is present.
        for slot in &incoming {
            prop_assert!(merged.get(slot.start()).is_some());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Merging the same generation twice is idempotent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merge_is_idempotent(
        existing in arb_collection(),
        incoming in prop::collection::vec(arb_interval(), 0..40),
        tz in arb_timezone(),
    ) {
        let once = merge(&existing, &incoming, tz);
        let twice = merge(&once, &incoming, tz);
        prop_assert_eq!(once, twice);
    }
}

// ---------------------------------------------------------------------------
// Property 6: Saved slots on days the generation does not touch survive
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn untouched_days_survive(
        existing in arb_collection(),
        (_, range) in arb_range(),
        tz in arb_timezone(),
    ) {
        let incoming = generate(&range, tz);
        let merged = merge(&existing, &incoming, tz);

        let touched: std::collections::HashSet<DayKey> =
            incoming.iter().map(|s| DayKey::of(s.start(), tz)).collect();
        for slot in &existing {
            if !touched.contains(&DayKey::of(slot.start(), tz)) {
                prop_assert_eq!(merged.get(slot.start()), Some(slot));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 7: Empty incoming leaves the collection unchanged
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn empty_incoming_is_identity(existing in arb_collection(), tz in arb_timezone()) {
        prop_assert_eq!(merge(&existing, &[], tz), existing);
    }
}
