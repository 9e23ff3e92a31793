//! AirCPA core: deterministic Closest-Point-of-Approach conflict
//! detection over a snapshot of ADS-B state vectors.
//!
//! The engine is synchronous and stateless across calls. Callers hand
//! in a snapshot (one state per aircraft) plus separation standards and
//! get back the list of predicted losses of separation within the
//! look-ahead horizon. Ingestion and presentation live outside this
//! crate.

pub mod conflict;
pub mod cpa;
pub mod models;
pub mod rules;
pub mod spatial;

pub use conflict::{detect_conflicts, ConflictDetector, MAX_RELATIVE_SPEED_MPS};
pub use cpa::{compute_cpa, Cpa};
pub use models::{AircraftState, Conflict};
pub use rules::{RulesError, SeparationStandards};
pub use spatial::{latlon_to_xy, xy_to_lonlat, EARTH_RADIUS_M, FT_TO_M, NM_TO_M};
