//! Per-frame sky tracking engine for Catloop Sky.
//!
//! Owns a hecs world with one entity per catalog object, runs the
//! smoothing, projection, lock and dwell stages in a fixed order each frame,
//! and produces `FrameSnapshot`s for the renderer.

pub mod dwell;
pub mod engine;
pub mod smoothing;
pub mod systems;
pub mod world_setup;

pub use catloop_core as core;
pub use engine::{FrameInput, SkyEngine};

#[cfg(test)]
mod tests;
