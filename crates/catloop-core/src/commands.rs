//! Session commands sent from the app shell to the tracker.
//!
//! Commands are queued and applied at the next frame boundary.

use serde::{Deserialize, Serialize};

use crate::mission::Mission;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    // --- Missions ---
    /// Make `mission` the active objective. Always starts a fresh attempt.
    SetActiveMission { mission: Mission },
    /// Free-look mode: no objective.
    ClearActiveMission,
    /// The caller captured a photo for a capture mission.
    SignalCapture { mission_id: String },

    // --- View ---
    /// Zoom: set the horizontal field of view (degrees).
    SetFieldOfView { degrees: f64 },
    /// The display surface changed size (pixels).
    ResizeViewport { width: f64, height: f64 },
}
