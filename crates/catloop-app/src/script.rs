//! Scripted sessions for headless replay.
//!
//! A script is a start instant, a duration, and a list of timed steps that
//! publish sensor samples or send session commands. Replay steps a
//! `FrameScheduler` over a `ManualClock` at the engine's frame rate, so the
//! same script always produces the same frames.

use std::path::Path;
use std::sync::mpsc;

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use catloop_astro::{equatorial_to_horizontal, local_sidereal_time};
use catloop_core::catalog::Catalog;
use catloop_core::commands::SessionCommand;
use catloop_core::enums::JulianConvention;
use catloop_core::mission;
use catloop_core::types::{GeoLocation, RawOrientation};
use catloop_sky::SkyEngine;

use crate::clock::{Clock, ManualClock};
use crate::error::SessionError;
use crate::frame_loop::{FrameScheduler, TickOutcome};
use crate::render::Renderer;
use crate::state::{LoopCommand, SensorSlots};

/// Longest session a script may describe (one day).
pub const MAX_SCRIPT_SECS: f64 = 86_400.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    pub start: DateTime<FixedOffset>,
    pub duration_secs: f64,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at_secs: f64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    /// Publish a raw orientation sample.
    Orientation(RawOrientation),
    /// Publish an observer location fix.
    Observer(GeoLocation),
    /// Publish the orientation that centers a catalog object right now.
    AimAt { object_id: String },
    /// Forward a session command.
    Command { command: SessionCommand },
}

impl ReplayScript {
    pub fn from_json_str(json: &str) -> Result<Self, SessionError> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    /// Check the duration is usable and the whole session stays in chrono's range.
    pub fn validate(&self) -> Result<(), SessionError> {
        if !(self.duration_secs.is_finite()
            && (0.0..=MAX_SCRIPT_SECS).contains(&self.duration_secs))
        {
            return Err(SessionError::InvalidScript(format!(
                "duration_secs must be within [0, {MAX_SCRIPT_SECS}], got {}",
                self.duration_secs
            )));
        }
        self.instant_at(self.duration_secs)?;
        Ok(())
    }

    fn instant_at(&self, secs: f64) -> Result<DateTime<FixedOffset>, SessionError> {
        self.start
            .checked_add_signed(Duration::microseconds((secs * 1e6).round() as i64))
            .ok_or_else(|| {
                SessionError::InvalidScript(format!("start + {secs} s is out of range"))
            })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SessionError::ScriptIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Evening over Bangkok: aim at Jupiter, start the Jupiter dwell mission,
    /// hold for a little longer than it needs.
    pub fn demo() -> Self {
        let bangkok = GeoLocation::default();
        let mut steps = vec![
            ScriptStep {
                at_secs: 0.0,
                action: ScriptAction::Observer(bangkok),
            },
            ScriptStep {
                at_secs: 0.0,
                action: ScriptAction::AimAt {
                    object_id: "jupiter".into(),
                },
            },
        ];
        if let Some(mission) = mission::find_builtin("m1") {
            steps.push(ScriptStep {
                at_secs: 0.0,
                action: ScriptAction::Command {
                    command: SessionCommand::SetActiveMission { mission },
                },
            });
        }
        Self {
            start: DateTime::parse_from_rfc3339("2025-01-15T20:00:00+07:00")
                .unwrap_or_else(|_| chrono::Local::now().fixed_offset()),
            duration_secs: 4.0,
            steps,
        }
    }

    /// Replay the script against `engine`, presenting every frame to `renderer`.
    /// The session is ended afterwards.
    pub fn replay<R: Renderer>(
        &self,
        engine: SkyEngine,
        renderer: R,
    ) -> Result<(SkyEngine, R), SessionError> {
        self.validate()?;
        let rate = f64::from(engine.frame_rate_hz().max(1));
        let clock = ManualClock::new(self.start);
        let slots = SensorSlots::default();
        let (tx, rx) = mpsc::channel();
        let mut scheduler = FrameScheduler::new(engine, clock.clone(), renderer, slots.clone(), rx);

        let mut steps: Vec<&ScriptStep> = self.steps.iter().collect();
        steps.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        let mut pending = steps.into_iter().peekable();

        let frames = ((self.duration_secs * rate).floor() as u64).saturating_add(1);
        for i in 0..frames {
            let t = i as f64 / rate;
            clock.set(self.instant_at(t)?);

            while let Some(step) = pending.next_if(|s| s.at_secs <= t + 1e-9) {
                self.apply(step, &scheduler, &clock, &slots, &tx);
            }

            if scheduler.tick() == TickOutcome::Shutdown {
                break;
            }
        }

        Ok(scheduler.finish())
    }

    fn apply<R: Renderer>(
        &self,
        step: &ScriptStep,
        scheduler: &FrameScheduler<ManualClock, R>,
        clock: &ManualClock,
        slots: &SensorSlots,
        commands: &mpsc::Sender<LoopCommand>,
    ) {
        debug!(at_secs = step.at_secs, action = ?step.action, "script step");
        match &step.action {
            ScriptAction::Orientation(sample) => slots.orientation.publish(*sample),
            ScriptAction::Observer(fix) => slots.observer.publish(*fix),
            ScriptAction::AimAt { object_id } => {
                let engine = scheduler.engine();
                let observer = slots
                    .observer
                    .latest()
                    .unwrap_or(engine.config().default_observer);
                match aim_orientation(
                    engine.catalog(),
                    object_id,
                    observer,
                    &clock.now(),
                    engine.config().julian_convention,
                ) {
                    Some(sample) => slots.orientation.publish(sample),
                    None => warn!(object_id = %object_id, "cannot aim at unknown object"),
                }
            }
            ScriptAction::Command { command } => {
                if commands.send(LoopCommand::Session(command.clone())).is_err() {
                    debug!("frame loop receiver dropped; script command discarded");
                }
            }
        }
    }
}

/// Raw orientation that puts `object_id` at the center of the view at `instant`.
pub fn aim_orientation(
    catalog: &Catalog,
    object_id: &str,
    observer: GeoLocation,
    instant: &DateTime<FixedOffset>,
    convention: JulianConvention,
) -> Option<RawOrientation> {
    let object = catalog.get(object_id)?;
    let lst = local_sidereal_time(instant, observer.longitude, convention);
    let h = equatorial_to_horizontal(object.ra, object.dec, observer.latitude, lst);
    Some(RawOrientation::new(h.azimuth, 90.0 - h.altitude, 0.0))
}
