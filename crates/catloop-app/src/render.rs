//! Frame consumers.
//!
//! The loop hands every snapshot to a `Renderer`. Drawing is out of scope
//! here; the provided renderers log or record frames.

use std::sync::{Arc, Mutex};

use catloop_core::enums::DwellPhase;
use catloop_core::events::CompletionEvent;
use catloop_core::state::FrameSnapshot;

pub trait Renderer {
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Logs lock transitions and completions, remembering every completion seen.
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_phase: DwellPhase,
    last_target: Option<String>,
    completions: Vec<CompletionEvent>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completions(&self) -> &[CompletionEvent] {
        &self.completions
    }
}

impl Renderer for LogRenderer {
    fn present(&mut self, frame: &FrameSnapshot) {
        let lock = &frame.lock;
        if lock.target_object_id != self.last_target {
            tracing::info!(
                frame = frame.time.frame,
                target = ?lock.target_object_id,
                "mission target changed"
            );
            self.last_target = lock.target_object_id.clone();
        }
        if lock.phase != self.last_phase {
            tracing::info!(
                frame = frame.time.frame,
                phase = ?lock.phase,
                centered = lock.centered,
                "lock phase changed"
            );
            self.last_phase = lock.phase;
        }
        tracing::trace!(
            frame = frame.time.frame,
            azimuth = frame.boresight.azimuth,
            altitude = frame.boresight.altitude(),
            progress = lock.progress,
            "frame"
        );
        if let Some(event) = &frame.completion {
            tracing::info!(
                frame = event.frame,
                mission = %event.mission_id,
                kind = ?event.kind,
                "mission complete"
            );
            self.completions.push(event.clone());
        }
    }
}

/// Keeps a copy of every presented frame. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    frames: Arc<Mutex<Vec<FrameSnapshot>>>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<FrameSnapshot> {
        self.frames.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.frames.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Renderer for FrameRecorder {
    fn present(&mut self, frame: &FrameSnapshot) {
        self.frames
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(frame.clone());
    }
}
