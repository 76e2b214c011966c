//! Session configuration.
//!
//! Every field has a default from [`crate::constants`], so a config document
//! only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::JulianConvention;
use crate::error::ConfigError;
use crate::types::{GeoLocation, Viewport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Horizontal field of view (degrees).
    pub fov_deg: f64,
    /// Overscan margin for visibility (pixels).
    pub overscan_px: f64,
    /// Lock radius around the viewport center (pixels, exclusive).
    pub lock_radius_px: f64,
    /// Orientation smoothing factor in (0, 1].
    pub smoothing_alpha: f64,
    pub viewport: Viewport,
    pub frame_rate_hz: u32,
    /// Observer used until the first location fix.
    pub default_observer: GeoLocation,
    pub julian_convention: JulianConvention,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fov_deg: DEFAULT_FOV_DEG,
            overscan_px: DEFAULT_OVERSCAN_PX,
            lock_radius_px: DEFAULT_LOCK_RADIUS_PX,
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            viewport: Viewport::default(),
            frame_rate_hz: FRAME_RATE_HZ,
            default_observer: GeoLocation::default(),
            julian_convention: JulianConvention::default(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        };
        positive("fov_deg", self.fov_deg)?;
        positive("lock_radius_px", self.lock_radius_px)?;
        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;
        if !self.overscan_px.is_finite() || self.overscan_px < 0.0 {
            return Err(ConfigError::Invalid {
                field: "overscan_px",
                reason: format!("must be zero or positive, got {}", self.overscan_px),
            });
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "smoothing_alpha",
                reason: format!("must be in (0, 1], got {}", self.smoothing_alpha),
            });
        }
        if self.frame_rate_hz == 0 {
            return Err(ConfigError::Invalid {
                field: "frame_rate_hz",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
