//! Sky engine: one computation pass per display frame.
//!
//! `SkyEngine` owns the catalog world, the orientation smoother and the dwell
//! tracker, applies queued session commands at frame boundaries, and runs
//! smoothing, projection, lock detection and dwell evaluation in that fixed
//! order. Completely headless (no clock, no sensors, no drawing), so frames
//! can be driven deterministically in tests.

use std::collections::VecDeque;

use chrono::{DateTime, FixedOffset};
use hecs::World;
use tracing::{debug, info, warn};

use catloop_astro::local_sidereal_time;
use catloop_core::catalog::Catalog;
use catloop_core::commands::SessionCommand;
use catloop_core::config::SessionConfig;
use catloop_core::constants::{MAX_FOV_DEG, MIN_FOV_DEG};
use catloop_core::events::CompletionEvent;
use catloop_core::mission::Mission;
use catloop_core::state::FrameSnapshot;
use catloop_core::types::{FrameTime, GeoLocation, RawOrientation, Viewport};

use crate::dwell::DwellCompletionTracker;
use crate::smoothing::OrientationSmoother;
use crate::systems;
use crate::systems::projection::ProjectionParams;
use crate::world_setup;

/// Inputs for one frame: the clock reading plus the latest sensor values.
///
/// `None` means no new sample is available; the engine keeps using the
/// last known value.
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub instant: DateTime<FixedOffset>,
    pub orientation: Option<RawOrientation>,
    pub observer: Option<GeoLocation>,
}

/// The sky engine. Owns the ECS world and all per-session state.
pub struct SkyEngine {
    world: World,
    catalog: Catalog,
    config: SessionConfig,
    time: FrameTime,
    session_start: Option<DateTime<FixedOffset>>,
    command_queue: VecDeque<SessionCommand>,

    fov_deg: f64,
    viewport: Viewport,
    smoother: OrientationSmoother,
    last_orientation: Option<RawOrientation>,
    observer: Option<GeoLocation>,
    warned_no_orientation: bool,

    active_mission: Option<Mission>,
    tracker: DwellCompletionTracker,
    pending_completion: Option<CompletionEvent>,
}

impl FrameInput {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self {
            instant,
            orientation: None,
            observer: None,
        }
    }

    pub fn with_orientation(mut self, orientation: RawOrientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_observer(mut self, observer: GeoLocation) -> Self {
        self.observer = Some(observer);
        self
    }
}

impl SkyEngine {
    /// Create an engine for one AR session over `catalog`.
    pub fn new(catalog: Catalog, config: SessionConfig) -> Self {
        let mut world = World::new();
        world_setup::spawn_catalog(&mut world, &catalog);
        info!(objects = catalog.len(), "sky session created");

        Self {
            world,
            fov_deg: config.fov_deg,
            viewport: config.viewport,
            smoother: OrientationSmoother::new(config.smoothing_alpha),
            catalog,
            config,
            time: FrameTime::default(),
            session_start: None,
            command_queue: VecDeque::new(),
            last_orientation: None,
            observer: None,
            warned_no_orientation: false,
            active_mission: None,
            tracker: DwellCompletionTracker::new(),
            pending_completion: None,
        }
    }

    /// Queue a session command for the next frame boundary.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Run one frame and return the resulting snapshot.
    pub fn tick(&mut self, input: FrameInput) -> FrameSnapshot {
        self.process_commands();

        let start = *self.session_start.get_or_insert(input.instant);
        let now_secs = seconds_between(start, input.instant);
        let frame = self.time.frame;

        if let Some(sample) = input.orientation {
            self.last_orientation = Some(sample);
        }
        if let Some(fix) = input.observer {
            self.observer = Some(fix);
        }
        if self.last_orientation.is_none() && !self.warned_no_orientation {
            warn!("no orientation sample yet; aiming at the default direction");
            self.warned_no_orientation = true;
        }
        let observer = self.observer.unwrap_or(self.config.default_observer);

        // 1. Orientation smoothing
        let raw = self.last_orientation.unwrap_or_default();
        let boresight = self.smoother.update(&raw);
        // 2. Horizontal coordinates for the frame's sidereal time
        let lst_deg = local_sidereal_time(
            &input.instant,
            observer.longitude,
            self.config.julian_convention,
        );
        systems::horizontal::run(&mut self.world, observer.latitude, lst_deg);
        // 3. Screen projection
        let params = ProjectionParams {
            boresight,
            viewport: self.viewport,
            fov_deg: self.fov_deg,
            overscan_px: self.config.overscan_px,
        };
        systems::projection::run(&mut self.world, &params);
        // 4. Lock detection
        let centered = systems::lock::run(
            &self.world,
            self.viewport.center(),
            self.config.lock_radius_px,
        );
        // 5. Dwell tracking
        let outcome = self
            .tracker
            .evaluate(self.active_mission.as_ref(), centered, now_secs, frame);
        let completion = self.pending_completion.take().or(outcome.completion);

        self.time.advance(now_secs);

        let objects = systems::snapshot::build_objects(&self.world);
        let edges = systems::snapshot::build_edges(&objects, self.catalog.edges());
        FrameSnapshot {
            time: self.time,
            instant: input.instant,
            lst_deg,
            observer,
            boresight,
            viewport: self.viewport,
            fov_deg: self.fov_deg,
            objects,
            edges,
            lock: outcome.lock,
            completion,
        }
    }

    /// End the AR session: discard the dwell attempt and the active mission.
    /// Smoothing state is kept only for the life of the engine.
    pub fn end_session(&mut self) {
        self.tracker.reset();
        self.active_mission = None;
        self.pending_completion = None;
        self.command_queue.clear();
        world_setup::mark_target(&mut self.world, None);
        info!(frames = self.time.frame, "sky session ended");
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }

    pub fn active_mission(&self) -> Option<&Mission> {
        self.active_mission.as_ref()
    }

    pub fn tracker(&self) -> &DwellCompletionTracker {
        &self.tracker
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Frame rate the scheduler should drive this engine at.
    pub fn frame_rate_hz(&self) -> u32 {
        self.config.frame_rate_hz
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single session command.
    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::SetActiveMission { mission } => {
                let found = world_setup::mark_target(
                    &mut self.world,
                    Some(mission.target_object_id.as_str()),
                );
                if !found {
                    warn!(
                        mission = %mission.id,
                        target = %mission.target_object_id,
                        "mission target is not in the catalog"
                    );
                }
                debug!(mission = %mission.id, "active mission set");
                self.tracker.reset();
                self.pending_completion = None;
                self.active_mission = Some(mission);
            }
            SessionCommand::ClearActiveMission => {
                world_setup::mark_target(&mut self.world, None);
                self.tracker.reset();
                self.pending_completion = None;
                self.active_mission = None;
                debug!("active mission cleared");
            }
            SessionCommand::SignalCapture { mission_id } => {
                let event = self.tracker.complete_capture(
                    self.active_mission.as_ref(),
                    &mission_id,
                    self.time.frame,
                );
                if event.is_some() {
                    self.pending_completion = event;
                }
            }
            SessionCommand::SetFieldOfView { degrees } => {
                if degrees.is_finite() {
                    self.fov_deg = degrees.clamp(MIN_FOV_DEG, MAX_FOV_DEG);
                } else {
                    warn!(degrees, "ignoring non-finite field of view");
                }
            }
            SessionCommand::ResizeViewport { width, height } => {
                if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
                    self.viewport = Viewport::new(width, height);
                } else {
                    warn!(width, height, "ignoring degenerate viewport size");
                }
            }
        }
    }
}

/// Seconds from `start` to `now`, never negative.
fn seconds_between(start: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> f64 {
    let micros = (now - start).num_microseconds().unwrap_or(i64::MAX);
    (micros as f64 / 1_000_000.0).max(0.0)
}
