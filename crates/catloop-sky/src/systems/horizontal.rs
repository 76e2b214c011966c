//! Horizontal coordinates system.
//!
//! Converts every object's fixed RA/Dec into altitude/azimuth for the
//! observer's latitude and the frame's local sidereal time.

use hecs::World;

use catloop_astro::equatorial_to_horizontal;
use catloop_core::components::Equatorial;
use catloop_core::types::Horizontal;

/// Recompute `Horizontal` for all entities with `Equatorial` coordinates.
pub fn run(world: &mut World, latitude_deg: f64, lst_deg: f64) {
    for (_entity, (eq, horizontal)) in world.query_mut::<(&Equatorial, &mut Horizontal)>() {
        *horizontal = equatorial_to_horizontal(eq.ra, eq.dec, latitude_deg, lst_deg);
    }
}
