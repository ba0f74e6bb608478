//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, merging, and overlap detection to the admin UI via
//! `wasm-bindgen`. All complex types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::{DstPolicy, RecurrenceConfig, SlotCollection, TimeInterval};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
}

impl From<&TimeInterval> for SlotDto {
    fn from(slot: &TimeInterval) -> Self {
        Self {
            start: slot.start().to_rfc3339(),
            end: slot.end().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
struct OverlapDto {
    earlier: SlotDto,
    later: SlotDto,
    overlap_minutes: i64,
}

/// Slot format accepted from JavaScript.
#[derive(Deserialize)]
struct SlotInput {
    start: String,
    end: String,
}

/// Recurrence configuration as built by the slot form.
///
/// Datetimes are strings so the form can send naive local-looking values.
#[derive(Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum ConfigInput {
    Single {
        #[serde(default)]
        anchor: Option<String>,
        duration_minutes: i64,
    },
    Range {
        #[serde(default)]
        start_boundary: Option<String>,
        #[serde(default)]
        end_boundary: Option<String>,
        increment_minutes: i64,
        #[serde(default)]
        gap_minutes: i64,
    },
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse an optional datetime, treating an empty string as unset.
fn parse_optional(s: Option<String>) -> Result<Option<DateTime<Utc>>, JsValue> {
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => slot_engine::parse_instant(s).map(Some).map_err(to_js),
    }
}

/// Map the policy names used by the slot form ("shift-forward", "skip").
fn parse_policy(name: &str) -> Option<DstPolicy> {
    match name.trim() {
        "shift-forward" | "" => Some(DstPolicy::ShiftForward),
        "skip" => Some(DstPolicy::Skip),
        _ => None,
    }
}

fn parse_config_json(json: &str) -> Result<RecurrenceConfig, JsValue> {
    let input: ConfigInput = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {}", e)))?;

    Ok(match input {
        ConfigInput::Single {
            anchor,
            duration_minutes,
        } => RecurrenceConfig::Single {
            anchor: parse_optional(anchor)?,
            duration_minutes,
        },
        ConfigInput::Range {
            start_boundary,
            end_boundary,
            increment_minutes,
            gap_minutes,
        } => RecurrenceConfig::Range {
            start_boundary: parse_optional(start_boundary)?,
            end_boundary: parse_optional(end_boundary)?,
            increment_minutes,
            gap_minutes,
        },
    })
}

/// Convert a JSON array of `{start, end}` objects into `Vec<TimeInterval>`.
fn parse_slots_json(json: &str) -> Result<Vec<TimeInterval>, JsValue> {
    let inputs: Vec<SlotInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid slots JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = slot_engine::parse_instant(&input.start).map_err(to_js)?;
            let end = slot_engine::parse_instant(&input.end).map_err(to_js)?;
            TimeInterval::new(start, end).map_err(to_js)
        })
        .collect()
}

fn slots_to_json<'a>(slots: impl IntoIterator<Item = &'a TimeInterval>) -> Result<String, JsValue> {
    let dtos: Vec<SlotDto> = slots.into_iter().map(SlotDto::from).collect();
    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate slots from a recurrence configuration.
///
/// `config_json` is `{"mode": "single", "anchor", "duration_minutes"}` or
/// `{"mode": "range", "start_boundary", "end_boundary", "increment_minutes",
/// "gap_minutes"}`. Returns a JSON array of `{start, end}` RFC 3339 strings.
/// Incomplete configurations return `[]`. Daily bounds inside a DST gap are
/// shifted forward.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(config_json: &str, timezone: &str) -> Result<String, JsValue> {
    generate_slots_with_policy(config_json, timezone, None)
}

/// Generate slots with an explicit DST policy.
///
/// `dst_policy` is `"shift-forward"` (default when omitted) or `"skip"`.
#[wasm_bindgen(js_name = "generateSlotsWithPolicy")]
pub fn generate_slots_with_policy(
    config_json: &str,
    timezone: &str,
    dst_policy: Option<String>,
) -> Result<String, JsValue> {
    let config = parse_config_json(config_json)?;
    let tz = slot_engine::parse_timezone(timezone).map_err(to_js)?;
    let policy = match dst_policy.as_deref() {
        None => DstPolicy::default(),
        Some(name) => parse_policy(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown DST policy: '{}'", name)))?,
    };

    slots_to_json(&slot_engine::generate_with_policy(&config, tz, policy))
}

/// Merge freshly generated slots into a saved collection.
///
/// Both arguments are JSON arrays of `{start, end}` objects. Returns the
/// merged collection, sorted by start, as a JSON array.
#[wasm_bindgen(js_name = "mergeSlots")]
pub fn merge_slots(existing_json: &str, incoming_json: &str, timezone: &str) -> Result<String, JsValue> {
    let existing = SlotCollection::from_intervals(parse_slots_json(existing_json)?);
    let incoming = parse_slots_json(incoming_json)?;
    let tz = slot_engine::parse_timezone(timezone).map_err(to_js)?;

    let merged = slot_engine::merge(&existing, &incoming, tz);
    slots_to_json(&merged)
}

/// Find overlapping slots in a collection.
///
/// Returns a JSON array of `{earlier, later, overlap_minutes}` objects.
#[wasm_bindgen(js_name = "findOverlaps")]
pub fn find_overlaps(collection_json: &str) -> Result<String, JsValue> {
    let collection = SlotCollection::from_intervals(parse_slots_json(collection_json)?);

    let dtos: Vec<OverlapDto> = slot_engine::find_overlaps(&collection)
        .iter()
        .map(|o| OverlapDto {
            earlier: SlotDto::from(&o.earlier),
            later: SlotDto::from(&o.later),
            overlap_minutes: o.overlap_minutes,
        })
        .collect();

    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
