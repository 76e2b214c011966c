//! Exponential smoothing of the orientation channels.
//!
//! Both channels are circular, so every step moves the short way across the
//! 0/360 seam and the output always stays in [0, 360).

use catloop_astro::angles::{normalize_degrees, shortest_delta};
use catloop_core::types::{Boresight, RawOrientation};

/// One smoothing step for a circular channel.
///
/// Moves `previous` toward `raw` by `alpha` of the shortest angular
/// difference and wraps the result into [0, 360).
pub fn filter_angle(previous: f64, raw: f64, alpha: f64) -> f64 {
    let delta = shortest_delta(previous, raw);
    normalize_degrees(previous + alpha * delta)
}

/// Smoothed azimuth and pitch, one filter per channel.
///
/// The first sample seeds both channels directly; later samples are blended.
#[derive(Debug, Clone)]
pub struct OrientationSmoother {
    alpha: f64,
    state: Option<Boresight>,
}

impl OrientationSmoother {
    pub fn new(alpha: f64) -> Self {
        Self { alpha, state: None }
    }

    /// Feed the latest raw sample and return the smoothed aim.
    /// Roll is ignored.
    pub fn update(&mut self, raw: &RawOrientation) -> Boresight {
        let next = match self.state {
            None => Boresight::new(normalize_degrees(raw.azimuth), normalize_degrees(raw.pitch)),
            Some(prev) => Boresight::new(
                filter_angle(prev.azimuth, raw.azimuth, self.alpha),
                filter_angle(prev.pitch, raw.pitch, self.alpha),
            ),
        };
        self.state = Some(next);
        next
    }

    /// Current smoothed aim, if any sample has been seen.
    pub fn current(&self) -> Option<Boresight> {
        self.state
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraparound_takes_short_path() {
        let out = filter_angle(350.0, 10.0, 0.5);
        assert!(out < 1e-9 || out > 360.0 - 1e-9, "got {out}, expected ~0");

        let out = filter_angle(10.0, 350.0, 0.5);
        assert!(out < 1e-9 || out > 360.0 - 1e-9, "got {out}, expected ~0");

        let out = filter_angle(350.0, 10.0, 0.25);
        assert!((out - 355.0).abs() < 1e-9, "got {out}");
    }

    #[test]
    fn test_output_always_in_range() {
        for prev in [0.0, 0.5, 179.0, 181.0, 359.9] {
            for raw in [-180.0, -0.1, 0.0, 90.0, 359.99, 360.0, 540.0] {
                let out = filter_angle(prev, raw, 0.08);
                assert!((0.0..360.0).contains(&out), "prev={prev} raw={raw} out={out}");
            }
        }
    }

    #[test]
    fn test_steady_input_is_a_fixed_point() {
        assert_eq!(filter_angle(42.0, 42.0, 0.08), 42.0);
        let mut smoother = OrientationSmoother::new(0.08);
        let raw = RawOrientation::new(123.0, 80.0, 5.0);
        let first = smoother.update(&raw);
        let second = smoother.update(&raw);
        assert_eq!(first, second);
        assert_eq!(second, Boresight::new(123.0, 80.0));
    }

    #[test]
    fn test_full_alpha_follows_raw_in_one_step() {
        assert!((filter_angle(10.0, 200.0, 1.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_smoother_converges_across_seam() {
        let mut smoother = OrientationSmoother::new(0.08);
        smoother.update(&RawOrientation::new(350.0, 90.0, 0.0));
        let mut last = 350.0;
        for _ in 0..200 {
            let b = smoother.update(&RawOrientation::new(10.0, 90.0, 0.0));
            // Never swings through 180.
            assert!(!(90.0..270.0).contains(&b.azimuth), "azimuth {}", b.azimuth);
            last = b.azimuth;
        }
        assert!((shortest_delta(last, 10.0)).abs() < 1e-3, "ended at {last}");
    }

    #[test]
    fn test_negative_pitch_is_normalized() {
        let mut smoother = OrientationSmoother::new(0.5);
        let b = smoother.update(&RawOrientation::new(0.0, -10.0, 0.0));
        assert_eq!(b.pitch, 350.0);
    }
}
