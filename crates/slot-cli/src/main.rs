//! `slots` CLI -- generate, merge, and inspect interview slot schedules.
//!
//! ## Usage
//!
//! ```sh
//! # Generate slots from a recurrence config (stdin → stdout)
//! echo '{"mode":"single","anchor":"2024-01-01T09:00:00Z","duration_minutes":30}' | slots generate
//!
//! # Generate with days read in a reference timezone
//! slots generate -i range.json --timezone Europe/Berlin --dst-policy skip
//!
//! # Merge a new generation into the saved collection
//! slots generate -i range.json | slots merge --existing saved.json -o saved.json
//!
//! # List overlapping slots
//! slots overlaps -i saved.json
//! ```

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slot_engine::{DstPolicy, RecurrenceConfig, SlotCollection, TimeInterval};
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "Interview slot scheduler CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a recurrence config (JSON) into slots
    Generate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// IANA timezone that calendar days are read in
        #[arg(long, default_value = "UTC")]
        timezone: String,
        /// How to treat daily bounds that fall in a DST gap
        #[arg(long, value_enum, default_value_t = PolicyArg::ShiftForward)]
        dst_policy: PolicyArg,
    },
    /// Merge newly generated slots into a saved collection
    Merge {
        /// Saved collection (JSON array of slots)
        #[arg(long)]
        existing: String,
        /// Newly generated slots (reads from stdin if omitted)
        #[arg(long)]
        incoming: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// IANA timezone that calendar days are read in
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// List overlapping slots in a collection
    Overlaps {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    ShiftForward,
    Skip,
}

impl From<PolicyArg> for DstPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::ShiftForward => DstPolicy::ShiftForward,
            PolicyArg::Skip => DstPolicy::Skip,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output,
            timezone,
            dst_policy,
        } => {
            let tz = parse_timezone(&timezone)?;
            let json = read_input(input.as_deref())?;
            let config: RecurrenceConfig =
                serde_json::from_str(&json).context("Failed to parse recurrence config")?;
            debug!(?config, %tz, "generating slots");

            let slots = slot_engine::generate_with_policy(&config, tz, dst_policy.into());
            info!(count = slots.len(), "generated slots");
            write_json(output.as_deref(), &slots)?;
        }
        Commands::Merge {
            existing,
            incoming,
            output,
            timezone,
        } => {
            let tz = parse_timezone(&timezone)?;
            let existing: SlotCollection = serde_json::from_str(&read_input(Some(existing.as_str()))?)
                .context("Failed to parse existing slots")?;
            let incoming: Vec<TimeInterval> =
                serde_json::from_str(&read_input(incoming.as_deref())?)
                    .context("Failed to parse incoming slots")?;

            let merged = slot_engine::merge(&existing, &incoming, tz);
            info!(
                before = existing.len(),
                incoming = incoming.len(),
                after = merged.len(),
                "merged slots"
            );
            write_json(output.as_deref(), &merged)?;
        }
        Commands::Overlaps { input } => {
            let collection: SlotCollection = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Failed to parse slots")?;
            let overlaps = slot_engine::find_overlaps(&collection);
            if !overlaps.is_empty() {
                tracing::warn!(count = overlaps.len(), "collection contains overlapping slots");
            }
            write_json(None, &overlaps)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays pipeable. `RUST_LOG` overrides the default.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_timezone(name: &str) -> Result<Tz> {
    slot_engine::parse_timezone(name).with_context(|| format!("Unknown timezone: '{}'", name))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: Option<&str>, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    content.push('\n');
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
