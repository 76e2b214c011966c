//! Enumeration types used throughout the tracker.

use serde::{Deserialize, Serialize};

/// Category of a catalog object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Star,
    Planet,
    Moon,
}

/// Dwell tracker state. Completion is delivered as an event, not a state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DwellPhase {
    /// No timer running.
    #[default]
    Idle,
    /// Target centered, timer running.
    Dwelling,
}

/// How a mission was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionKind {
    /// Target held centered for the required duration.
    Dwell,
    /// Completion signaled by the caller (photo capture).
    Captured,
}

/// How a wall-clock instant is turned into a Julian Date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JulianConvention {
    /// Unix time shifted by the instant's UTC offset. Matches the deployed
    /// app, which folds the device timezone into the Julian Date.
    #[default]
    LocalWallClock,
    /// Standard Julian Date from UTC; the offset is ignored.
    Utc,
}
