//! AirCPA command line - offline CPA conflict detection over historic
//! ADS-B state vectors.
//!
//! Usage:
//!   aircpa data/states_2022-06-27-15_germany.csv --lookahead 120 --sep-nm 5 --sep-ft 1000

mod ingest;

use std::path::PathBuf;

use aircpa_core::{xy_to_lonlat, Conflict, ConflictDetector, SeparationStandards};
use anyhow::{bail, Result};
use chrono::DateTime;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Detect predicted losses of separation in an ADS-B snapshot.
#[derive(Parser, Debug)]
#[command(author, version, about = "Deterministic CPA conflict detection over ADS-B snapshots")]
struct Args {
    /// OpenSky state-vector CSV export
    csv: PathBuf,

    /// Snapshot timestamp (unix seconds); defaults to the earliest in the file
    #[arg(long)]
    time: Option<i64>,

    /// Look-ahead horizon in seconds
    #[arg(long, default_value_t = 120.0)]
    lookahead: f64,

    /// Horizontal separation minimum in nautical miles
    #[arg(long, default_value_t = 5.0)]
    sep_nm: f64,

    /// Vertical separation minimum in feet
    #[arg(long, default_value_t = 1000.0)]
    sep_ft: f64,

    /// Emit the conflict list as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let detector = ConflictDetector::new(SeparationStandards {
        lookahead_s: args.lookahead,
        horizontal_sep_nm: args.sep_nm,
        vertical_sep_ft: args.sep_ft,
    })?;

    let rows = ingest::load_states(&args.csv)?;
    let times = ingest::available_times(&rows);
    let Some(&earliest) = times.first() else {
        bail!("no usable airborne state rows in {}", args.csv.display());
    };

    let time = args.time.unwrap_or(earliest);
    if !times.contains(&time) {
        bail!(
            "no states at t={time}; file covers {}..{}",
            earliest,
            times.last().unwrap_or(&earliest)
        );
    }

    let snapshot = ingest::snapshot_at(&rows, time);
    tracing::info!(aircraft = snapshot.len(), time, "snapshot loaded");

    let conflicts = detector.detect(&snapshot);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
        return Ok(());
    }

    print_table(&conflicts, &snapshot, time);
    Ok(())
}

fn print_table(conflicts: &[Conflict], snapshot: &[aircpa_core::AircraftState], time: i64) {
    let when = DateTime::from_timestamp(time, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%SZ").to_string())
        .unwrap_or_else(|| time.to_string());
    println!(
        "{} aircraft at {when}: {} predicted conflict(s)",
        snapshot.len(),
        conflicts.len()
    );
    if conflicts.is_empty() {
        return;
    }

    // Reference point matches the engine's projection anchor, so the
    // planar CPA location back-projects onto the map.
    let count = snapshot.len() as f64;
    let lat_ref = snapshot.iter().map(|ac| ac.lat_deg).sum::<f64>() / count;
    let lon_ref = snapshot.iter().map(|ac| ac.lon_deg).sum::<f64>() / count;

    println!(
        "{:<8} {:<8} {:>8} {:>10} {:>12} {:>9} {:>9}",
        "ownship", "intruder", "t_cpa_s", "d_cpa_nm", "vert_sep_ft", "cpa_lat", "cpa_lon"
    );
    for c in conflicts {
        let (cpa_lon, cpa_lat) = xy_to_lonlat(c.cpa_x, c.cpa_y, lat_ref, lon_ref);
        println!(
            "{:<8} {:<8} {:>8.1} {:>10.2} {:>12.0} {:>9.4} {:>9.4}",
            c.a, c.b, c.t_cpa, c.d_cpa_nm, c.vert_sep_ft, cpa_lat, cpa_lon
        );
    }
}
