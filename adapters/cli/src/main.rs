#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Treasure Hunt map to completion.

mod event_log;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use treasure_hunt_format as map_format;
use treasure_hunt_system_expedition::run_to_completion_with;
use treasure_hunt_world::query;

use crate::event_log::EventLog;

/// Plays a treasure hunt map and prints the final state of the map.
#[derive(Debug, Parser)]
#[command(name = "treasure-hunt", version)]
struct CliArgs {
    /// Map description to play.
    input: PathBuf,
    /// File receiving the final map; printed to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// File receiving every simulation event as a JSON line.
    #[arg(long, value_name = "PATH")]
    events: Option<PathBuf>,
    /// Parses and re-serializes the map without playing it.
    #[arg(long)]
    dry_run: bool,
}

/// Entry point for the Treasure Hunt command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(CliArgs::parse())
}

fn run(args: CliArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read map from {}", args.input.display()))?;
    let mut world = map_format::parse_str(&text)
        .with_context(|| format!("failed to initialise map from {}", args.input.display()))?;

    let dimension = query::dimension(&world);
    log::info!(
        "loaded {}x{} map with {} adventurers from {}",
        dimension.width(),
        dimension.height(),
        query::adventurers(&world).len(),
        args.input.display()
    );

    let mut recorded = EventLog::default();
    if args.dry_run {
        log::info!("dry run requested; skipping the expedition");
    } else {
        let report = run_to_completion_with(&mut world, |event| recorded.record(event));
        log::info!(
            "expedition finished after {} rounds: {} moves, {} blocked, {} treasures collected",
            report.rounds(),
            report.advances(),
            report.blocked_moves(),
            report.treasures_collected()
        );
    }

    if let Some(path) = &args.events {
        let encoded = recorded.to_json_lines().context("failed to encode event log")?;
        fs::write(path, encoded)
            .with_context(|| format!("failed to write event log to {}", path.display()))?;
        log::info!("wrote {} events to {}", recorded.len(), path.display());
    }

    let rendered = map_format::serialize(&world);
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write map to {}", path.display()))?;
            log::info!("wrote final map to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
