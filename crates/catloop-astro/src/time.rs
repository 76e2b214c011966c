//! Julian date and sidereal time.

use chrono::{DateTime, FixedOffset};

use catloop_core::constants::{
    GMST_AT_J2000_DEG, GMST_DEG_PER_DAY, JD_J2000, JD_UNIX_EPOCH, MILLIS_PER_DAY, SECONDS_PER_DAY,
};
use catloop_core::enums::JulianConvention;

use crate::angles::normalize_degrees;

/// Julian Date of `instant`.
///
/// Under [`JulianConvention::LocalWallClock`] the instant's UTC offset is
/// added to the Unix time, reproducing the deployed app's readings. Under
/// [`JulianConvention::Utc`] this is the standard Julian Date.
pub fn julian_date(instant: &DateTime<FixedOffset>, convention: JulianConvention) -> f64 {
    let utc_days = instant.timestamp_millis() as f64 / MILLIS_PER_DAY;
    let offset_days = match convention {
        JulianConvention::LocalWallClock => {
            instant.offset().local_minus_utc() as f64 / SECONDS_PER_DAY
        }
        JulianConvention::Utc => 0.0,
    };
    utc_days + offset_days + JD_UNIX_EPOCH
}

/// Greenwich mean sidereal time (degrees, [0, 360)), linear in days since J2000.
pub fn greenwich_sidereal_time(jd: f64) -> f64 {
    let days = jd - JD_J2000;
    normalize_degrees(GMST_AT_J2000_DEG + GMST_DEG_PER_DAY * days)
}

/// Local sidereal time (degrees, [0, 360)) for an observer at `longitude_deg` (east positive).
pub fn local_sidereal_time(
    instant: &DateTime<FixedOffset>,
    longitude_deg: f64,
    convention: JulianConvention,
) -> f64 {
    let jd = julian_date(instant, convention);
    normalize_degrees(greenwich_sidereal_time(jd) + longitude_deg)
}
