//! Frame loop: drives the sky engine once per display frame.
//!
//! Each pass drains pending commands, reads the latest sensor values, runs one
//! engine tick against the clock's current instant, and hands the snapshot to
//! the renderer. `run` paces passes at the configured frame rate on a
//! dedicated thread until cancelled or told to shut down.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use catloop_core::commands::SessionCommand;
use catloop_sky::{FrameInput, SkyEngine};

use crate::clock::Clock;
use crate::error::SessionError;
use crate::render::Renderer;
use crate::state::{CancelToken, LoopCommand, SensorSlots};

/// Result of a single scheduler pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was computed and presented.
    Presented,
    /// A shutdown was requested; no frame was produced.
    Shutdown,
}

pub struct FrameScheduler<C, R> {
    engine: SkyEngine,
    clock: C,
    renderer: R,
    slots: SensorSlots,
    commands: mpsc::Receiver<LoopCommand>,
    frame_interval: Duration,
}

impl<C: Clock, R: Renderer> FrameScheduler<C, R> {
    pub fn new(
        engine: SkyEngine,
        clock: C,
        renderer: R,
        slots: SensorSlots,
        commands: mpsc::Receiver<LoopCommand>,
    ) -> Self {
        let rate = u64::from(engine.frame_rate_hz().max(1));
        Self {
            engine,
            clock,
            renderer,
            slots,
            commands,
            frame_interval: Duration::from_nanos(1_000_000_000 / rate),
        }
    }

    /// Run exactly one frame.
    pub fn tick(&mut self) -> TickOutcome {
        loop {
            match self.commands.try_recv() {
                Ok(LoopCommand::Session(command)) => self.engine.queue_command(command),
                Ok(LoopCommand::Shutdown) => return TickOutcome::Shutdown,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return TickOutcome::Shutdown,
            }
        }

        let mut input = FrameInput::new(self.clock.now());
        input.orientation = self.slots.orientation.latest();
        input.observer = self.slots.observer.latest();

        let snapshot = self.engine.tick(input);
        self.renderer.present(&snapshot);
        TickOutcome::Presented
    }

    /// Pace frames until `cancel` fires or a shutdown arrives, then end the
    /// session. Falls back to "now" when more than two frames behind.
    pub fn run(&mut self, cancel: &CancelToken) {
        info!(interval_ms = self.frame_interval.as_secs_f64() * 1000.0, "frame loop started");
        let mut next_frame_time = Instant::now();

        while !cancel.is_cancelled() {
            if self.tick() == TickOutcome::Shutdown {
                debug!("shutdown requested");
                break;
            }

            next_frame_time += self.frame_interval;
            let now = Instant::now();
            if next_frame_time > now {
                std::thread::sleep(next_frame_time - now);
            } else if now - next_frame_time > self.frame_interval * 2 {
                next_frame_time = now;
            }
        }

        self.end_session();
    }

    /// End the session and hand back the engine and renderer.
    pub fn finish(mut self) -> (SkyEngine, R) {
        self.end_session();
        (self.engine, self.renderer)
    }

    pub fn engine(&self) -> &SkyEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn slots(&self) -> &SensorSlots {
        &self.slots
    }

    fn end_session(&mut self) {
        self.engine.end_session();
        info!(frames = self.engine.time().frame, "frame loop stopped");
    }
}

/// Owner's side of a running frame loop thread.
///
/// Dropping the handle cancels the loop and waits for the thread to exit.
pub struct SessionHandle<R> {
    commands: mpsc::Sender<LoopCommand>,
    cancel: CancelToken,
    join: Option<JoinHandle<(SkyEngine, R)>>,
}

impl<R> SessionHandle<R> {
    /// Forward a command to the engine; applied at the next frame boundary.
    pub fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(LoopCommand::Session(command))
            .map_err(|_| SessionError::Closed)
    }

    /// Ask the loop to stop after its current frame.
    pub fn request_shutdown(&self) -> Result<(), SessionError> {
        self.commands
            .send(LoopCommand::Shutdown)
            .map_err(|_| SessionError::Closed)
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, |j| j.is_finished())
    }

    /// Cancel the loop, wait for it, and return the engine and renderer.
    pub fn stop(mut self) -> Result<(SkyEngine, R), SessionError> {
        self.cancel.cancel();
        let join = self.join.take().ok_or(SessionError::Closed)?;
        join.join().map_err(|_| SessionError::Panicked)
    }
}

impl<R> Drop for SessionHandle<R> {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawn the frame loop on its own thread.
pub fn spawn_frame_loop<C, R>(
    engine: SkyEngine,
    clock: C,
    renderer: R,
    slots: SensorSlots,
) -> Result<SessionHandle<R>, SessionError>
where
    C: Clock + Send + 'static,
    R: Renderer + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let cancel = CancelToken::new();
    let token = cancel.clone();

    let join = std::thread::Builder::new()
        .name("catloop-frame-loop".into())
        .spawn(move || {
            let mut scheduler = FrameScheduler::new(engine, clock, renderer, slots, cmd_rx);
            scheduler.run(&token);
            (scheduler.engine, scheduler.renderer)
        })
        .map_err(SessionError::Spawn)?;

    Ok(SessionHandle {
        commands: cmd_tx,
        cancel,
        join: Some(join),
    })
}
