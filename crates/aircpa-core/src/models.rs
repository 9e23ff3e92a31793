//! Core data models: aircraft state vectors and detected conflicts.

use serde::{Deserialize, Serialize};

use crate::spatial::latlon_to_xy;

/// Instantaneous kinematic state of one aircraft, as decoded from an
/// ADS-B state vector.
///
/// Immutable value type. All motion assumptions downstream are linear
/// and time-invariant over the prediction horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftState {
    /// ICAO 24-bit address, unique within a snapshot
    pub icao24: String,
    pub lat_deg: f64,
    pub lon_deg: f64,
    /// Ground speed in m/s
    pub velocity_mps: f64,
    /// True track in degrees, 0 = north, clockwise positive
    pub heading_deg: f64,
    /// Barometric altitude in meters; absent when the transponder did
    /// not report one
    #[serde(default)]
    pub altitude_m: Option<f64>,
    /// Signed climb/descent rate in m/s
    #[serde(default)]
    pub vertical_rate_mps: f64,
}

impl AircraftState {
    /// Planar position relative to the reference point, in meters.
    pub fn position_xy(&self, lat0: f64, lon0: f64) -> (f64, f64) {
        latlon_to_xy(self.lat_deg, self.lon_deg, lat0, lon0)
    }

    /// Planar velocity vector (east, north) in m/s.
    pub fn velocity_vector(&self) -> (f64, f64) {
        let h = self.heading_deg.to_radians();
        (self.velocity_mps * h.sin(), self.velocity_mps * h.cos())
    }
}

/// Predicted loss of separation between one unordered aircraft pair.
///
/// Emitted only when both the horizontal and the vertical minimum are
/// violated at the same instant. The `a`/`b` role assignment follows
/// pair enumeration order and carries no physical meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conflict {
    pub a: String,
    pub b: String,
    /// Seconds until closest point of approach, strictly positive
    pub t_cpa: f64,
    /// Horizontal separation at CPA, in nautical miles
    pub d_cpa_nm: f64,
    /// Vertical separation magnitude at CPA, in feet
    pub vert_sep_ft: f64,
    /// Planar CPA location: aircraft `a`'s position advanced by its own
    /// velocity over `t_cpa`, for geodetic back-projection downstream
    pub cpa_x: f64,
    pub cpa_y: f64,
}
