//! Entity spawn factories for the catalog world.

use hecs::{Entity, World};

use catloop_core::catalog::{Catalog, CelestialObject};
use catloop_core::components::{Equatorial, MissionTarget, SkyObject};
use catloop_core::types::{Horizontal, ScreenPoint};

/// Spawn one entity per catalog object.
pub fn spawn_catalog(world: &mut World, catalog: &Catalog) {
    for (order, object) in catalog.objects().iter().enumerate() {
        spawn_object(world, object, order);
    }
}

/// Spawn a catalog object with empty per-frame components.
pub fn spawn_object(world: &mut World, object: &CelestialObject, order: usize) -> Entity {
    world.spawn((
        SkyObject {
            id: object.id.clone(),
            order,
            kind: object.kind,
            color: object.color.clone(),
            magnitude: object.magnitude,
            marker_radius: object.marker_radius(),
        },
        Equatorial {
            ra: object.ra,
            dec: object.dec,
        },
        Horizontal::default(),
        ScreenPoint::default(),
    ))
}

/// Move the `MissionTarget` marker to the object with `target_id`.
///
/// Returns whether the target exists in the world.
pub fn mark_target(world: &mut World, target_id: Option<&str>) -> bool {
    let marked: Vec<Entity> = world
        .query::<&MissionTarget>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in marked {
        let _ = world.remove_one::<MissionTarget>(entity);
    }

    let Some(target_id) = target_id else {
        return false;
    };
    let found = world
        .query::<&SkyObject>()
        .iter()
        .find(|(_, obj)| obj.id == target_id)
        .map(|(entity, _)| entity);

    match found {
        Some(entity) => world.insert_one(entity, MissionTarget).is_ok(),
        None => false,
    }
}
