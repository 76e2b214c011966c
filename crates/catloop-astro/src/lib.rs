//! Positional astronomy for the sky tracker.
//!
//! Pure functions only: angle folding, Julian date, local sidereal time and
//! the equatorial to horizontal transform. No state, no failure modes.

pub mod angles;
pub mod coords;
pub mod time;

pub use coords::equatorial_to_horizontal;
pub use time::{julian_date, local_sidereal_time};
