//! Lock detection: is the mission target under the reticle?

use glam::DVec2;
use hecs::World;

use catloop_core::components::MissionTarget;
use catloop_core::types::ScreenPoint;

/// A target is centered when it is visible and strictly closer than
/// `lock_radius` pixels to the boresight point. Exactly `lock_radius` away
/// does not count.
pub fn is_centered(boresight_px: DVec2, target: &ScreenPoint, lock_radius: f64) -> bool {
    target.visible && target.distance_to(boresight_px) < lock_radius
}

/// Check the entity marked as mission target. No target entity means not centered.
pub fn run(world: &World, boresight_px: DVec2, lock_radius: f64) -> bool {
    world
        .query::<(&ScreenPoint, &MissionTarget)>()
        .iter()
        .next()
        .is_some_and(|(_, (screen, _))| is_centered(boresight_px, screen, lock_radius))
}
