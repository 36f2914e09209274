//! Wrap-aware angle math on the ecliptic circle.
//!
//! Longitudes live in [0, 360); deltas are wrapped to (-180, +180] so the
//! 0°/360° seam never manufactures a 360° jump.

/// Normalize a longitude to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Wrap an angle difference to (-180, +180].
pub fn wrap_180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Shortest-arc separation between two longitudes, in [0, 180].
pub fn angular_separation(lon_a_deg: f64, lon_b_deg: f64) -> f64 {
    wrap_180(lon_a_deg - lon_b_deg).abs()
}
