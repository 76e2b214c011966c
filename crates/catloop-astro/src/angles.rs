//! Degree-based angle helpers that respect the 0/360 seam.

/// Wrap any finite angle into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Fold an angular difference into [-180, 180] so it points the short way round.
pub fn fold_degrees(delta: f64) -> f64 {
    let wrapped = normalize_degrees(delta);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to` (degrees).
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    fold_degrees(to - from)
}
