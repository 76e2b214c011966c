//! State shared between the frame loop and the threads that feed it.
//!
//! Sensors and the geolocation provider write into single-slot holders
//! (last value wins, nothing queued). Mission control talks to the loop over
//! an `mpsc` channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use catloop_core::commands::SessionCommand;
use catloop_core::types::{GeoLocation, RawOrientation};

/// Commands sent to the frame loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A session command to forward to the sky engine.
    Session(SessionCommand),
    /// Stop the frame loop after the current frame.
    Shutdown,
}

/// Single-slot "latest value" holder. Writers overwrite, readers peek.
#[derive(Debug)]
pub struct LatestValue<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for LatestValue<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for LatestValue<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }
}

impl<T: Clone> LatestValue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is in the slot.
    pub fn publish(&self, value: T) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(value);
    }

    /// The most recent value, if any was ever published.
    pub fn latest(&self) -> Option<T> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Slots written by the orientation sensor and the location provider.
#[derive(Debug, Clone, Default)]
pub struct SensorSlots {
    pub orientation: LatestValue<RawOrientation>,
    pub observer: LatestValue<GeoLocation>,
}

/// Cooperative cancellation flag shared by the loop and its owner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
