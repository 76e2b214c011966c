//! Dwell completion state machine.
//!
//! Turns "target centered for long enough" into a one-shot completion event.
//! Pure data plus transitions; no ECS dependency. Time is seconds on the
//! session clock.
//!
//! ```text
//! Idle --centered, timed mission, not yet completed--> Dwelling
//! Dwelling --not centered / mission changed--> Idle (progress discarded)
//! Dwelling --elapsed >= required--> Idle + CompletionEvent
//! ```

use tracing::{debug, info, warn};

use catloop_core::enums::{CompletionKind, DwellPhase};
use catloop_core::events::CompletionEvent;
use catloop_core::mission::Mission;
use catloop_core::state::LockState;

/// Identity of one mission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MissionKey {
    mission_id: String,
    target_id: String,
}

/// Result of evaluating one frame.
#[derive(Debug, Clone, Default)]
pub struct DwellOutcome {
    pub lock: LockState,
    pub completion: Option<CompletionEvent>,
}

#[derive(Debug, Clone, Default)]
pub struct DwellCompletionTracker {
    phase: DwellPhase,
    instance: Option<MissionKey>,
    started_at: Option<f64>,
    /// A completion already fired for the current mission instance.
    completed: bool,
}

impl MissionKey {
    fn of(mission: &Mission) -> Self {
        Self {
            mission_id: mission.id.clone(),
            target_id: mission.target_object_id.clone(),
        }
    }
}

impl DwellCompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DwellPhase {
        self.phase
    }

    /// Whether the current mission instance has already completed.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Drop all timer and completion state. The next mission seen starts fresh.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Evaluate one frame against the active mission.
    ///
    /// `centered` comes from the lock detector; `now_secs` is the session clock.
    pub fn evaluate(
        &mut self,
        mission: Option<&Mission>,
        centered: bool,
        now_secs: f64,
        frame: u64,
    ) -> DwellOutcome {
        let Some(mission) = mission else {
            if self.instance.is_some() {
                self.reset();
            }
            return DwellOutcome::default();
        };

        self.enter_instance(mission);
        let idle = LockState {
            target_object_id: Some(mission.target_object_id.clone()),
            centered,
            ..LockState::default()
        };

        // Capture missions are completed by the caller, never timed.
        let Some(required) = mission.dwell_seconds() else {
            return DwellOutcome {
                lock: idle,
                completion: None,
            };
        };

        if !centered || self.completed {
            if self.phase == DwellPhase::Dwelling {
                debug!(mission = %mission.id, frame, "dwell broken");
            }
            self.phase = DwellPhase::Idle;
            self.started_at = None;
            return DwellOutcome {
                lock: idle,
                completion: None,
            };
        }

        if self.phase == DwellPhase::Idle {
            debug!(mission = %mission.id, frame, "dwell started");
        }
        self.phase = DwellPhase::Dwelling;
        let start = *self.started_at.get_or_insert(now_secs);
        let elapsed = (now_secs - start).max(0.0);
        let progress = (elapsed / required).clamp(0.0, 1.0);

        if elapsed < required {
            return DwellOutcome {
                lock: LockState {
                    phase: DwellPhase::Dwelling,
                    elapsed_secs: elapsed,
                    progress,
                    ..idle
                },
                completion: None,
            };
        }

        self.phase = DwellPhase::Idle;
        self.started_at = None;
        self.completed = true;
        info!(mission = %mission.id, elapsed, frame, "mission completed by dwell");

        DwellOutcome {
            lock: LockState {
                elapsed_secs: elapsed,
                progress,
                ..idle
            },
            completion: Some(CompletionEvent {
                mission_id: mission.id.clone(),
                kind: CompletionKind::Dwell,
                frame,
            }),
        }
    }

    /// Complete a capture mission on the caller's signal.
    ///
    /// Returns `None` when there is no matching capture mission or it has
    /// already completed.
    pub fn complete_capture(
        &mut self,
        mission: Option<&Mission>,
        mission_id: &str,
        frame: u64,
    ) -> Option<CompletionEvent> {
        let Some(mission) = mission.filter(|m| m.id == mission_id && m.is_capture()) else {
            warn!(mission = %mission_id, "capture signal does not match an active capture mission");
            return None;
        };

        self.enter_instance(mission);
        if self.completed {
            debug!(mission = %mission_id, "capture already completed");
            return None;
        }
        self.completed = true;
        info!(mission = %mission_id, frame, "mission completed by capture");

        Some(CompletionEvent {
            mission_id: mission.id.clone(),
            kind: CompletionKind::Captured,
            frame,
        })
    }

    /// Start a new instance when the mission or its target changed.
    fn enter_instance(&mut self, mission: &Mission) {
        let key = MissionKey::of(mission);
        if self.instance.as_ref() != Some(&key) {
            self.reset();
            self.instance = Some(key);
        }
    }
}
