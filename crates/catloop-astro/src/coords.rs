//! Equatorial (RA/Dec) to horizontal (Alt/Az) conversion.

use catloop_core::types::Horizontal;

use crate::angles::normalize_degrees;

/// Convert right ascension / declination to altitude / azimuth for an observer
/// at `latitude_deg` when the local sidereal time is `lst_deg`. All degrees.
///
/// Azimuth is measured from north through east. Rounding overshoot in the
/// `asin`/`acos` arguments is clamped, so finite inputs always give finite
/// output with altitude in [-90, 90] and azimuth in [0, 360).
pub fn equatorial_to_horizontal(ra: f64, dec: f64, latitude_deg: f64, lst_deg: f64) -> Horizontal {
    let hour_angle = (lst_deg - ra).to_radians();
    let dec = dec.to_radians();
    let lat = latitude_deg.to_radians();

    let sin_alt = (lat.sin() * dec.sin() + lat.cos() * dec.cos() * hour_angle.cos()).clamp(-1.0, 1.0);
    let alt = sin_alt.asin();

    let denom = lat.cos() * alt.cos();
    // Pole or zenith: azimuth is undefined, report north.
    let cos_az = if denom.abs() < f64::EPSILON {
        1.0
    } else {
        ((dec.sin() - lat.sin() * sin_alt) / denom).clamp(-1.0, 1.0)
    };
    let mut az = cos_az.acos().to_degrees();

    // West of the meridian the object has passed transit.
    if hour_angle.sin() > 0.0 {
        az = 360.0 - az;
    }

    Horizontal::new(alt.to_degrees(), normalize_degrees(az))
}
