//! Closest-point-of-approach solver for linear relative motion.

/// Result of a CPA computation for one aircraft pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cpa {
    /// Seconds until closest approach. `None` when relative velocity is
    /// exactly zero and the separation never changes. May be negative
    /// (CPA in the past); windowing is the caller's job.
    pub time_s: Option<f64>,
    /// Horizontal separation at CPA in meters. With zero relative
    /// velocity this is the current separation, not zero or infinity.
    pub distance_m: f64,
}

fn dot(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

fn norm(v: (f64, f64)) -> f64 {
    v.0.hypot(v.1)
}

/// Compute time and distance at closest point of approach, assuming
/// both aircraft hold constant velocity in the horizontal plane.
///
/// # Arguments
/// * `relative_position_m` - Intruder position minus ownship position, meters
/// * `relative_velocity_mps` - Intruder velocity minus ownship velocity, m/s
pub fn compute_cpa(relative_position_m: (f64, f64), relative_velocity_mps: (f64, f64)) -> Cpa {
    let rel_speed_sq = dot(relative_velocity_mps, relative_velocity_mps);

    if rel_speed_sq == 0.0 {
        return Cpa {
            time_s: None,
            distance_m: norm(relative_position_m),
        };
    }

    // Squared separation is quadratic in t; its minimum sits at
    // t* = -(p . v) / |v|^2.
    let t_cpa_s = -dot(relative_position_m, relative_velocity_mps) / rel_speed_sq;
    let d_cpa_m = norm((
        relative_position_m.0 + relative_velocity_mps.0 * t_cpa_s,
        relative_position_m.1 + relative_velocity_mps.1 * t_cpa_s,
    ));

    Cpa {
        time_s: Some(t_cpa_s),
        distance_m: d_cpa_m,
    }
}
