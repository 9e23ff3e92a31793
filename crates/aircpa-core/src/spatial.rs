//! Spatial math: local-tangent-plane projection and unit constants.
//!
//! The projection is a flat-earth equirectangular approximation around a
//! per-snapshot reference point. Valid for spans of a few hundred
//! kilometers; no curvature correction is applied.

/// Mean spherical Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per nautical mile.
pub const NM_TO_M: f64 = 1852.0;

/// Meters per foot.
pub const FT_TO_M: f64 = 0.3048;

/// Project geodetic coordinates into a local planar frame.
///
/// The frame is anchored at `(lat0, lon0)`, with x pointing east and
/// y pointing north, both in meters.
///
/// # Arguments
/// * `lat`, `lon` - Position in decimal degrees
/// * `lat0`, `lon0` - Reference point in decimal degrees
///
/// # Returns
/// `(x, y)` in meters
pub fn latlon_to_xy(lat: f64, lon: f64, lat0: f64, lon0: f64) -> (f64, f64) {
    let lat = lat.to_radians();
    let lon = lon.to_radians();
    let lat0 = lat0.to_radians();
    let lon0 = lon0.to_radians();

    let x = (lon - lon0) * lat0.cos() * EARTH_RADIUS_M;
    let y = (lat - lat0) * EARTH_RADIUS_M;
    (x, y)
}

/// Inverse of [`latlon_to_xy`].
///
/// Returns `(lon, lat)` in decimal degrees. Exact algebraic inverse of
/// the forward projection for any reference latitude away from the
/// poles (cos(lat0) != 0).
pub fn xy_to_lonlat(x: f64, y: f64, lat0: f64, lon0: f64) -> (f64, f64) {
    let lon = lon0 + (x / (EARTH_RADIUS_M * lat0.to_radians().cos())).to_degrees();
    let lat = lat0 + (y / EARTH_RADIUS_M).to_degrees();
    (lon, lat)
}
