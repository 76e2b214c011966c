//! Fundamental geometric and timing types.
//!
//! All angles are degrees. Azimuth-like angles are stored in [0, 360).

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Observer position on Earth (degrees, north and east positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// One orientation sample as delivered by the device sensor.
///
/// `azimuth` is the compass-like heading, `pitch` the front-back tilt
/// (0 = lying flat facing up, 90 = upright facing the horizon).
/// `roll` is accepted but not used by the projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOrientation {
    pub azimuth: f64,
    pub pitch: f64,
    #[serde(default)]
    pub roll: f64,
}

/// Smoothed aim direction of the device. Both channels in [0, 360).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Boresight {
    pub azimuth: f64,
    pub pitch: f64,
}

/// Position of an object in the observer's local sky.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Horizontal {
    /// Degrees above the horizon, in [-90, 90].
    pub altitude: f64,
    /// Degrees clockwise from north, in [0, 360).
    pub azimuth: f64,
}

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A projected position on the viewport. Recomputed every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Within the overscan-expanded viewport.
    pub visible: bool,
}

/// Frame counter and elapsed session time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FrameTime {
    /// Number of completed frames.
    pub frame: u64,
    /// Seconds since the first frame of the session.
    pub elapsed_secs: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_OBSERVER_LATITUDE,
            crate::constants::DEFAULT_OBSERVER_LONGITUDE,
        )
    }
}

impl RawOrientation {
    pub fn new(azimuth: f64, pitch: f64, roll: f64) -> Self {
        Self {
            azimuth,
            pitch,
            roll,
        }
    }
}

impl Boresight {
    pub fn new(azimuth: f64, pitch: f64) -> Self {
        Self { azimuth, pitch }
    }

    /// Altitude the device is aimed at: pitch 90 looks at the horizon.
    pub fn altitude(&self) -> f64 {
        90.0 - self.pitch
    }
}

impl Horizontal {
    pub fn new(altitude: f64, azimuth: f64) -> Self {
        Self { altitude, azimuth }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport center, where the boresight lands.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Height / width.
    pub fn aspect(&self) -> f64 {
        self.height / self.width
    }

    /// Whether a point lies within the viewport grown by `margin` on every side.
    /// Edges are inclusive.
    pub fn contains_with_margin(&self, x: f64, y: f64, margin: f64) -> bool {
        x >= -margin && x <= self.width + margin && y >= -margin && y <= self.height + margin
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_VIEWPORT_WIDTH,
            crate::constants::DEFAULT_VIEWPORT_HEIGHT,
        )
    }
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64, visible: bool) -> Self {
        Self { x, y, visible }
    }

    pub fn as_vec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Pixel distance to another point.
    pub fn distance_to(&self, other: DVec2) -> f64 {
        self.as_vec2().distance(other)
    }
}

impl FrameTime {
    /// Advance by one frame to `elapsed_secs` since the session started.
    pub fn advance(&mut self, elapsed_secs: f64) {
        self.frame += 1;
        self.elapsed_secs = elapsed_secs;
    }
}
