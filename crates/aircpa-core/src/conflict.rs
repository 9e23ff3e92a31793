//! Pairwise conflict detection over a single ADS-B snapshot.
//!
//! One call to [`ConflictDetector::detect`] is an independent,
//! side-effect-free pass: project every aircraft into a shared local
//! plane, evaluate every unordered pair with the CPA solver, and keep
//! the pairs that violate both separation minima inside the look-ahead
//! horizon.

use crate::cpa::compute_cpa;
use crate::models::{AircraftState, Conflict};
use crate::rules::{RulesError, SeparationStandards};
use crate::spatial::{FT_TO_M, NM_TO_M};

/// Conservative upper bound on the closing speed between two aircraft,
/// used only by the pre-filter. Well above two transport-category
/// aircraft head-on, so the filter can never drop a true conflict.
pub const MAX_RELATIVE_SPEED_MPS: f64 = 600.0;

/// Deterministic CPA-based conflict detector.
///
/// Holds only the separation standards; no aircraft state survives
/// between calls.
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    standards: SeparationStandards,
}

impl ConflictDetector {
    /// Create a detector after validating the standards.
    pub fn new(standards: SeparationStandards) -> Result<Self, RulesError> {
        standards.validate()?;
        Ok(Self { standards })
    }

    pub fn standards(&self) -> &SeparationStandards {
        &self.standards
    }

    /// Run one detection pass over a snapshot.
    ///
    /// The snapshot is trusted to hold at most one state per icao24.
    /// Output order follows pair enumeration order; sorting is a
    /// presentation concern.
    pub fn detect(&self, snapshot: &[AircraftState]) -> Vec<Conflict> {
        let lookahead_s = self.standards.lookahead_s;
        let horizontal_sep_m = self.standards.horizontal_sep_nm * NM_TO_M;
        let vertical_sep_m = self.standards.vertical_sep_ft * FT_TO_M;

        let mut conflicts = Vec::new();
        if snapshot.len() < 2 {
            return conflicts;
        }

        // No pair further apart than this can close to within the
        // horizontal minimum inside the horizon.
        let max_initial_distance_m = MAX_RELATIVE_SPEED_MPS * lookahead_s + horizontal_sep_m;

        let (lat_ref, lon_ref) = mean_lat_lon(snapshot);

        let positions_m: Vec<(f64, f64)> = snapshot
            .iter()
            .map(|ac| ac.position_xy(lat_ref, lon_ref))
            .collect();
        let velocities_mps: Vec<(f64, f64)> = snapshot
            .iter()
            .map(|ac| ac.velocity_vector())
            .collect();

        for i in 0..snapshot.len() {
            for j in (i + 1)..snapshot.len() {
                let ownship = &snapshot[i];
                let intruder = &snapshot[j];

                let rel_position_m = (
                    positions_m[j].0 - positions_m[i].0,
                    positions_m[j].1 - positions_m[i].1,
                );

                // Horizontal distance pre-filter
                if rel_position_m.0.hypot(rel_position_m.1) > max_initial_distance_m {
                    continue;
                }

                let rel_velocity_mps = (
                    velocities_mps[j].0 - velocities_mps[i].0,
                    velocities_mps[j].1 - velocities_mps[i].1,
                );

                let cpa = compute_cpa(rel_position_m, rel_velocity_mps);

                // CPA must lie strictly in the future and inside the horizon.
                let t_cpa_s = match cpa.time_s {
                    Some(t) if t > 0.0 && t <= lookahead_s => t,
                    _ => continue,
                };

                if cpa.distance_m >= horizontal_sep_m {
                    continue;
                }

                // Vertical separation check
                let (Some(ownship_alt_m), Some(intruder_alt_m)) =
                    (ownship.altitude_m, intruder.altitude_m)
                else {
                    continue;
                };

                let initial_vertical_sep_m = intruder_alt_m - ownship_alt_m;
                let relative_vertical_rate_mps =
                    intruder.vertical_rate_mps - ownship.vertical_rate_mps;
                let vertical_sep_at_cpa_m =
                    initial_vertical_sep_m + relative_vertical_rate_mps * t_cpa_s;

                if vertical_sep_at_cpa_m.abs() >= vertical_sep_m {
                    continue;
                }

                // CPA point convention: ownship's position advanced along
                // its own velocity, not the pair midpoint.
                let cpa_xy_m = (
                    positions_m[i].0 + velocities_mps[i].0 * t_cpa_s,
                    positions_m[i].1 + velocities_mps[i].1 * t_cpa_s,
                );

                conflicts.push(Conflict {
                    a: ownship.icao24.clone(),
                    b: intruder.icao24.clone(),
                    t_cpa: t_cpa_s,
                    d_cpa_nm: cpa.distance_m / NM_TO_M,
                    vert_sep_ft: vertical_sep_at_cpa_m.abs() / FT_TO_M,
                    cpa_x: cpa_xy_m.0,
                    cpa_y: cpa_xy_m.1,
                });
            }
        }

        tracing::debug!(
            aircraft = snapshot.len(),
            conflicts = conflicts.len(),
            lookahead_s,
            "detection pass complete"
        );

        conflicts
    }
}

/// Run one detection pass with explicit parameters.
///
/// Convenience wrapper over [`ConflictDetector`] for callers that do
/// not keep a detector around.
pub fn detect_conflicts(
    snapshot: &[AircraftState],
    lookahead_s: f64,
    sep_nm: f64,
    sep_ft: f64,
) -> Vec<Conflict> {
    ConflictDetector {
        standards: SeparationStandards {
            lookahead_s,
            horizontal_sep_nm: sep_nm,
            vertical_sep_ft: sep_ft,
        },
    }
    .detect(snapshot)
}

/// Arithmetic mean latitude/longitude of the snapshot, used as the
/// projection reference point.
fn mean_lat_lon(snapshot: &[AircraftState]) -> (f64, f64) {
    let count = snapshot.len() as f64;
    let (sum_lat, sum_lon) = snapshot.iter().fold((0.0, 0.0), |acc, ac| {
        (acc.0 + ac.lat_deg, acc.1 + ac.lon_deg)
    });
    (sum_lat / count, sum_lon / count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aircraft(
        icao24: &str,
        lat: f64,
        lon: f64,
        velocity_mps: f64,
        heading_deg: f64,
        altitude_m: Option<f64>,
        vertical_rate_mps: f64,
    ) -> AircraftState {
        AircraftState {
            icao24: icao24.to_string(),
            lat_deg: lat,
            lon_deg: lon,
            velocity_mps,
            heading_deg,
            altitude_m,
            vertical_rate_mps,
        }
    }

    /// Two aircraft ~10 km apart at the same altitude, closing head-on.
    fn head_on_snapshot() -> Vec<AircraftState> {
        vec![
            aircraft("a", 0.0, 0.0, 100.0, 90.0, Some(10_000.0), 0.0),
            aircraft("b", 0.0, 0.09, 100.0, 270.0, Some(10_000.0), 0.0),
        ]
    }

    #[test]
    fn detects_simple_horizontal_conflict() {
        let conflicts = detect_conflicts(&head_on_snapshot(), 120.0, 5.0, 1000.0);

        assert_eq!(conflicts.len(), 1);
        let c = &conflicts[0];
        assert_eq!(
            {
                let mut ids = [c.a.as_str(), c.b.as_str()];
                ids.sort();
                ids
            },
            ["a", "b"]
        );
        assert!(c.d_cpa_nm < 5.0);
        assert!(c.vert_sep_ft < 1000.0);
        assert!(c.t_cpa > 0.0 && c.t_cpa <= 120.0);
    }

    #[test]
    fn vertical_separation_excludes_conflict() {
        let mut snapshot = head_on_snapshot();
        // ~3300 ft offset clears a 1000 ft minimum.
        snapshot[1].altitude_m = Some(11_000.0);

        let conflicts = detect_conflicts(&snapshot, 120.0, 5.0, 1000.0);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn missing_altitude_excludes_pair() {
        let mut snapshot = head_on_snapshot();
        snapshot[0].altitude_m = None;

        let conflicts = detect_conflicts(&snapshot, 120.0, 5.0, 1000.0);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn converging_vertical_rates_create_conflict() {
        let mut snapshot = head_on_snapshot();
        // Intruder starts 600 m above but descends to meet ownship
        // around the CPA instant (~50 s in).
        snapshot[1].altitude_m = Some(10_600.0);
        snapshot[1].vertical_rate_mps = -12.0;

        let conflicts = detect_conflicts(&snapshot, 120.0, 5.0, 1000.0);
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn detection_is_symmetric_in_snapshot_order() {
        let forward = detect_conflicts(&head_on_snapshot(), 120.0, 5.0, 1000.0);
        let mut reversed_snapshot = head_on_snapshot();
        reversed_snapshot.reverse();
        let reversed = detect_conflicts(&reversed_snapshot, 120.0, 5.0, 1000.0);

        assert_eq!(forward.len(), 1);
        assert_eq!(reversed.len(), 1);
        let (f, r) = (&forward[0], &reversed[0]);
        // Roles may swap; the physics must not.
        assert_eq!((f.a.as_str(), f.b.as_str()), (r.b.as_str(), r.a.as_str()));
        assert!((f.t_cpa - r.t_cpa).abs() < 1e-9);
        assert!((f.d_cpa_nm - r.d_cpa_nm).abs() < 1e-9);
        assert!((f.vert_sep_ft - r.vert_sep_ft).abs() < 1e-9);
    }

    #[test]
    fn identical_velocity_pair_never_conflicts() {
        // Same heading and speed at close range: zero relative velocity,
        // CPA time undefined, no record.
        let snapshot = vec![
            aircraft("a", 0.0, 0.0, 200.0, 45.0, Some(9_000.0), 0.0),
            aircraft("b", 0.001, 0.001, 200.0, 45.0, Some(9_000.0), 0.0),
        ];
        let conflicts = detect_conflicts(&snapshot, 300.0, 5.0, 1000.0);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn cpa_in_the_past_is_not_a_conflict() {
        // Same geometry as head-on but already diverging.
        let snapshot = vec![
            aircraft("a", 0.0, 0.0, 100.0, 270.0, Some(10_000.0), 0.0),
            aircraft("b", 0.0, 0.09, 100.0, 90.0, Some(10_000.0), 0.0),
        ];
        let conflicts = detect_conflicts(&snapshot, 120.0, 5.0, 1000.0);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn horizon_boundary_is_closed_on_the_right() {
        // Head-on CPA at ~50.06 s (0.09 deg of longitude at the
        // equator closing at 200 m/s).
        let snapshot = head_on_snapshot();
        let t_cpa = detect_conflicts(&snapshot, 120.0, 5.0, 1000.0)[0].t_cpa;

        // Horizon exactly at t_cpa: still included.
        let at_boundary = detect_conflicts(&snapshot, t_cpa, 5.0, 1000.0);
        assert_eq!(at_boundary.len(), 1);

        // Horizon just short of t_cpa: excluded.
        let below_boundary = detect_conflicts(&snapshot, t_cpa - 1e-6, 5.0, 1000.0);
        assert!(below_boundary.is_empty());
    }

    #[test]
    fn distant_traffic_is_prefiltered_without_false_negatives() {
        // ~2 degrees of latitude apart (~222 km) with a 60 s horizon:
        // beyond 600 * 60 + 9260 m, so the pre-filter drops the pair.
        // The unfiltered CPA confirms no conflict was possible anyway.
        let snapshot = vec![
            aircraft("a", 0.0, 0.0, 250.0, 0.0, Some(10_000.0), 0.0),
            aircraft("b", 2.0, 0.0, 250.0, 180.0, Some(10_000.0), 0.0),
        ];
        let conflicts = detect_conflicts(&snapshot, 60.0, 5.0, 1000.0);
        assert!(conflicts.is_empty());

        let cpa = compute_cpa((0.0, 222_389.0), (0.0, -500.0));
        let t = cpa.time_s.unwrap();
        // Separation at the horizon still far exceeds the minimum.
        assert!(t > 60.0 || cpa.distance_m >= 5.0 * NM_TO_M);
        let sep_at_horizon = 222_389.0 - 500.0 * 60.0;
        assert!(sep_at_horizon > 5.0 * NM_TO_M);
    }

    #[test]
    fn cpa_point_follows_ownship_convention() {
        let snapshot = head_on_snapshot();
        let (lat_ref, lon_ref) = super::mean_lat_lon(&snapshot);
        let conflicts = detect_conflicts(&snapshot, 120.0, 5.0, 1000.0);
        let c = &conflicts[0];

        let ownship = snapshot.iter().find(|ac| ac.icao24 == c.a).unwrap();
        let (x0, y0) = ownship.position_xy(lat_ref, lon_ref);
        let (vx, vy) = ownship.velocity_vector();
        assert!((c.cpa_x - (x0 + vx * c.t_cpa)).abs() < 1e-6);
        assert!((c.cpa_y - (y0 + vy * c.t_cpa)).abs() < 1e-6);
    }

    #[test]
    fn empty_and_singleton_snapshots_yield_nothing() {
        assert!(detect_conflicts(&[], 120.0, 5.0, 1000.0).is_empty());
        let one = vec![aircraft("a", 0.0, 0.0, 100.0, 90.0, Some(10_000.0), 0.0)];
        assert!(detect_conflicts(&one, 120.0, 5.0, 1000.0).is_empty());
    }

    #[test]
    fn output_order_follows_pair_enumeration() {
        // Three aircraft converging on one point: pairs (0,1), (0,2),
        // (1,2) in that order.
        let snapshot = vec![
            aircraft("a", 0.0, -0.05, 100.0, 90.0, Some(10_000.0), 0.0),
            aircraft("b", 0.0, 0.05, 100.0, 270.0, Some(10_000.0), 0.0),
            aircraft("c", -0.05, 0.0, 100.0, 0.0, Some(10_000.0), 0.0),
        ];
        let conflicts = detect_conflicts(&snapshot, 120.0, 5.0, 1000.0);
        let pairs: Vec<(&str, &str)> = conflicts
            .iter()
            .map(|c| (c.a.as_str(), c.b.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "c")]);
    }

    #[test]
    fn detector_rejects_invalid_standards() {
        let standards = SeparationStandards {
            lookahead_s: -1.0,
            ..Default::default()
        };
        assert!(ConflictDetector::new(standards).is_err());
    }
}
