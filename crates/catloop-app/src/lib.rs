//! Catloop Sky session runtime.
//!
//! Wires the headless sky engine to a clock, latest-value sensor slots,
//! a command channel and a renderer, and drives it once per display frame.

pub mod clock;
pub mod error;
pub mod frame_loop;
pub mod render;
pub mod script;
pub mod state;

pub use catloop_core as core;
