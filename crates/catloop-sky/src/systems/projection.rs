//! Screen projection system.
//!
//! Maps horizontal coordinates to viewport pixels relative to the smoothed
//! boresight. The mapping is linear in angle (no perspective): one degree is
//! `width / fov` pixels on both axes.

use hecs::World;

use catloop_astro::angles::shortest_delta;
use catloop_core::types::{Boresight, Horizontal, ScreenPoint, Viewport};

/// Everything the projection needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionParams {
    pub boresight: Boresight,
    pub viewport: Viewport,
    /// Horizontal field of view (degrees).
    pub fov_deg: f64,
    pub overscan_px: f64,
}

impl ProjectionParams {
    /// Vertical field of view, derived from the aspect ratio.
    pub fn vertical_fov_deg(&self) -> f64 {
        self.fov_deg * self.viewport.aspect()
    }
}

/// Project one sky position onto the viewport.
///
/// Only the azimuth offset is folded. The altitude offset is the plain
/// difference against `90 - pitch`.
pub fn project(horizontal: &Horizontal, params: &ProjectionParams) -> ScreenPoint {
    let d_az = shortest_delta(params.boresight.azimuth, horizontal.azimuth);
    let d_alt = horizontal.altitude - params.boresight.altitude();

    let vp = params.viewport;
    let center = vp.center();
    let x = center.x + d_az / params.fov_deg * vp.width;
    let y = center.y - d_alt / params.vertical_fov_deg() * vp.height;

    ScreenPoint::new(x, y, vp.contains_with_margin(x, y, params.overscan_px))
}

/// Recompute `ScreenPoint` for all entities with `Horizontal` coordinates.
pub fn run(world: &mut World, params: &ProjectionParams) {
    for (_entity, (horizontal, screen)) in world.query_mut::<(&Horizontal, &mut ScreenPoint)>() {
        *screen = project(horizontal, params);
    }
}
