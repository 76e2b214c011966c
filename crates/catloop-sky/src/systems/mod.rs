//! ECS systems that run over the catalog world each frame.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They keep no state of their own; per-object results live in components.

pub mod horizontal;
pub mod lock;
pub mod projection;
pub mod snapshot;
