//! Frame snapshot: everything the renderer and the app shell need after a frame.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::enums::{DwellPhase, ObjectKind};
use crate::events::CompletionEvent;
use crate::types::{Boresight, FrameTime, GeoLocation, Horizontal, ScreenPoint, Viewport};

/// Complete per-frame output. Holds no references into the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: FrameTime,
    /// Instant the frame was computed for.
    pub instant: DateTime<FixedOffset>,
    /// Local sidereal time used for the frame (degrees).
    pub lst_deg: f64,
    pub observer: GeoLocation,
    pub boresight: Boresight,
    pub viewport: Viewport,
    pub fov_deg: f64,
    pub objects: Vec<ObjectView>,
    pub edges: Vec<EdgeView>,
    pub lock: LockState,
    pub completion: Option<CompletionEvent>,
}

/// One catalog object as seen this frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: String,
    pub kind: ObjectKind,
    pub color: String,
    pub magnitude: f64,
    /// Marker size hint (pixels).
    pub marker_radius: f64,
    pub horizontal: Horizontal,
    pub screen: ScreenPoint,
    pub is_target: bool,
}

/// A constellation line with both ends inside the overscan area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeView {
    pub from: String,
    pub to: String,
    pub from_point: ScreenPoint,
    pub to_point: ScreenPoint,
}

/// Lock and dwell progress on the active target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockState {
    pub target_object_id: Option<String>,
    pub centered: bool,
    pub phase: DwellPhase,
    /// Seconds the current attempt has been held centered.
    pub elapsed_secs: f64,
    /// elapsed / required, in [0, 1].
    pub progress: f64,
}

impl FrameSnapshot {
    pub fn object(&self, id: &str) -> Option<&ObjectView> {
        self.objects.iter().find(|o| o.id == id)
    }
}
