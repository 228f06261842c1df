//! Bet Tracker Rust Service
//!
//! Weekly bet-sheet ingestion and score refresh for the CFB bets tracker.
//!
//! This service:
//! - Reads a week's bet sheet (shows -> bettors -> bet lines)
//! - Fetches weekend scoreboard snapshots from ESPN
//! - Resolves each line to a game and settles it
//! - Saves a binary snapshot plus a JSON export for display tooling
//! - Refreshes saved snapshots, touching pending bets only

mod config;
mod ingest;

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use log::{info, warn};

use bets_rust_core::{store, EspnClient, ScoreSource};
use config::TrackerConfig;
use ingest::WeekInput;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = TrackerConfig::from_env();
    let args: Vec<String> = env::args().collect();

    match (args.get(1).map(String::as_str), args.get(2)) {
        (Some("ingest"), Some(input)) => ingest_week(Path::new(input), &config).await,
        (Some("refresh"), Some(snapshot)) => refresh_week(Path::new(snapshot), &config).await,
        _ => bail!("usage: bet_tracker_rust <ingest INPUT.json | refresh OUTPUT.bets>"),
    }
}

/// Build, settle, and persist one week of bets.
async fn ingest_week(input_path: &Path, config: &TrackerConfig) -> Result<()> {
    let raw = fs::read_to_string(input_path)
        .with_context(|| format!("reading {}", input_path.display()))?;
    let input: WeekInput = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", input_path.display()))?;

    let client = EspnClient::with_timeout(config.http_timeout);
    let snapshots = client.fetch_weekend_scores(&input.cfb_friday).await?;
    info!(
        "fetched {} scoreboard games for the weekend of {}",
        snapshots.len(),
        input.cfb_friday
    );

    // The week is named after the directory holding its input file.
    let week_name = input_path
        .parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .unwrap_or("week");

    let (week, failures) = ingest::build_week_group(week_name, &input, &snapshots)?;
    for failure in &failures {
        warn!(
            "{}: bet {:?} was skipped: {}",
            failure.category, failure.text, failure.reason
        );
    }

    write_outputs(input_path.parent().unwrap_or(Path::new(".")), &week)?;
    log_record(&week);
    Ok(())
}

/// Reload a saved week, pull fresh scores for its date span, and settle
/// whatever was still pending.
async fn refresh_week(snapshot_path: &Path, config: &TrackerConfig) -> Result<()> {
    let mut week = store::load_group(snapshot_path)?;

    let Some((start, end)) = week.date_span() else {
        bail!("snapshot {} holds no bets", snapshot_path.display());
    };

    let client = EspnClient::with_timeout(config.http_timeout);
    // Fetch before touching anything: a failed fetch leaves the saved
    // state exactly as it was.
    let snapshots = client.fetch_scores(&start, Some(&end)).await?;
    info!("fetched {} scoreboard games for {start}-{end}", snapshots.len());

    week.refresh(&snapshots, config.force_refresh)?;
    week.evaluate()?;

    write_outputs(snapshot_path.parent().unwrap_or(Path::new(".")), &week)?;
    log_record(&week);
    Ok(())
}

fn write_outputs(dir: &Path, week: &bets_rust_core::BetGroup) -> Result<()> {
    let snapshot_path = dir.join("output.bets");
    let export_path = dir.join("output.json");
    store::save_group(&snapshot_path, week)?;
    store::export_json_to(&export_path, week)?;
    info!(
        "wrote {} and {}",
        snapshot_path.display(),
        export_path.display()
    );
    Ok(())
}

fn log_record(week: &bets_rust_core::BetGroup) {
    info!(
        "{}: {}-{}-{} ({} pending), profit {:+.2} units",
        week.name, week.hits, week.misses, week.pushes, week.pendings, week.profit
    );
}
