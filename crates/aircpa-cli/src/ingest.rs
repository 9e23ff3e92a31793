//! OpenSky state-vector CSV ingestion.
//!
//! Turns historic ADS-B CSV exports into per-timestamp snapshots for
//! the detection engine. Rows without a usable position or velocity
//! solution and rows on the ground are dropped up front.

use std::path::Path;

use aircpa_core::AircraftState;
use anyhow::Context;
use serde::Deserialize;

/// One row of an OpenSky state-vector export. Unused columns
/// (callsign, squawk, contact times, ...) are ignored by serde.
#[derive(Debug, Clone, Deserialize)]
pub struct StateRow {
    pub time: i64,
    pub icao24: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Ground speed in m/s
    pub velocity: Option<f64>,
    /// True track in degrees
    pub heading: Option<f64>,
    /// Vertical rate in m/s
    pub vertrate: Option<f64>,
    pub baroaltitude: Option<f64>,
    /// Pandas exports write Python booleans ("True"/"False")
    pub onground: Option<String>,
}

impl StateRow {
    fn is_airborne(&self) -> bool {
        !matches!(&self.onground, Some(s) if s.trim().eq_ignore_ascii_case("true"))
    }

    /// A row is usable when it carries a full horizontal solution.
    fn is_usable(&self) -> bool {
        self.lat.is_some() && self.lon.is_some() && self.velocity.is_some() && self.heading.is_some()
    }
}

/// Load and pre-filter state rows from a CSV file.
pub fn load_states(path: &Path) -> anyhow::Result<Vec<StateRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening state CSV {}", path.display()))?;

    let mut rows = Vec::new();
    for (line, result) in reader.deserialize().enumerate() {
        let row: StateRow =
            result.with_context(|| format!("parsing state CSV record {}", line + 1))?;
        if row.is_usable() && row.is_airborne() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Distinct observation timestamps, ascending.
pub fn available_times(rows: &[StateRow]) -> Vec<i64> {
    let mut times: Vec<i64> = rows.iter().map(|r| r.time).collect();
    times.sort_unstable();
    times.dedup();
    times
}

/// Build the snapshot for one timestamp.
///
/// The engine trusts the snapshot to hold one state per icao24, so
/// duplicate rows at the same timestamp resolve last-record-wins while
/// keeping first-seen order.
pub fn snapshot_at(rows: &[StateRow], time: i64) -> Vec<AircraftState> {
    let mut snapshot: Vec<AircraftState> = Vec::new();

    for row in rows.iter().filter(|r| r.time == time) {
        let state = AircraftState {
            icao24: row.icao24.clone(),
            lat_deg: row.lat.unwrap_or_default(),
            lon_deg: row.lon.unwrap_or_default(),
            velocity_mps: row.velocity.unwrap_or_default(),
            heading_deg: row.heading.unwrap_or_default(),
            altitude_m: row.baroaltitude,
            vertical_rate_mps: row.vertrate.unwrap_or_default(),
        };
        match snapshot.iter_mut().find(|ac| ac.icao24 == state.icao24) {
            Some(existing) => *existing = state,
            None => snapshot.push(state),
        }
    }

    snapshot
}
