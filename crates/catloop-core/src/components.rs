//! ECS components for hecs entities.
//!
//! Each catalog object is one entity. Components are plain data;
//! the math lives in systems.

use serde::{Deserialize, Serialize};

use crate::enums::ObjectKind;

/// Identity and display data of a catalog object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyObject {
    pub id: String,
    /// Position in catalog order, used to keep snapshot output stable.
    pub order: usize,
    pub kind: ObjectKind,
    pub color: String,
    pub magnitude: f64,
    pub marker_radius: f64,
}

/// Fixed equatorial coordinates (degrees).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Equatorial {
    pub ra: f64,
    pub dec: f64,
}

/// Marker for the current mission target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MissionTarget;
