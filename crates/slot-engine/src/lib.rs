//! # slot-engine
//!
//! Deterministic generation and merging of bookable interview slots.
//!
//! An admin describes a schedule compactly (a day range, a daily window, a
//! slot length and a gap). The engine expands that description into concrete
//! slots and folds them into the previously saved set, replacing the slots
//! the new generation covers and leaving the rest untouched.
//!
//! Everything here is pure: no clock is read, nothing is persisted, and the
//! same inputs always produce the same output.
//!
//! ## Modules
//!
//! - [`interval`] -- a single `[start, end)` slot
//! - [`collection`] -- the sorted, start-unique set of saved slots
//! - [`recurrence`] -- single and range slot configurations
//! - [`generator`] -- recurrence configuration → list of slots
//! - [`merger`] -- fold generated slots into a saved collection
//! - [`overlap`] -- find slots whose ranges intersect
//! - [`dst`] -- DST resolution policies for local wall-clock times
//! - [`day`] -- calendar-day keys and parsing helpers
//! - [`error`] -- Error types

pub mod collection;
pub mod day;
pub mod dst;
pub mod error;
pub mod generator;
pub mod interval;
pub mod merger;
pub mod overlap;
pub mod recurrence;

pub use collection::SlotCollection;
pub use day::{parse_instant, parse_timezone, DayKey};
pub use dst::DstPolicy;
pub use error::SlotError;
pub use generator::{generate, generate_with_policy};
pub use interval::TimeInterval;
pub use merger::{affected_ranges, merge, AffectedRange};
pub use overlap::{find_overlaps, Overlap};
pub use recurrence::RecurrenceConfig;
