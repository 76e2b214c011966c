//! Snapshot system: reads the world and builds the renderer-facing views.
//!
//! Read-only over the world.

use std::collections::HashMap;

use hecs::World;

use catloop_core::catalog::ConstellationEdge;
use catloop_core::components::{MissionTarget, SkyObject};
use catloop_core::state::{EdgeView, ObjectView};
use catloop_core::types::{Horizontal, ScreenPoint};

/// Build ObjectViews for every catalog entity, in catalog order.
pub fn build_objects(world: &World) -> Vec<ObjectView> {
    let mut rows: Vec<(usize, ObjectView)> = world
        .query::<(&SkyObject, &Horizontal, &ScreenPoint, Option<&MissionTarget>)>()
        .iter()
        .map(|(_, (obj, horizontal, screen, target))| {
            (
                obj.order,
                ObjectView {
                    id: obj.id.clone(),
                    kind: obj.kind,
                    color: obj.color.clone(),
                    magnitude: obj.magnitude,
                    marker_radius: obj.marker_radius,
                    horizontal: *horizontal,
                    screen: *screen,
                    is_target: target.is_some(),
                },
            )
        })
        .collect();
    rows.sort_by_key(|(order, _)| *order);
    rows.into_iter().map(|(_, view)| view).collect()
}

/// Keep the constellation lines whose endpoints are both visible.
///
/// Both ends only need to be inside the overscan band, so a line crossing
/// the screen edge is still drawn and slides in rather than popping.
pub fn build_edges<'a>(
    objects: &[ObjectView],
    edges: impl IntoIterator<Item = &'a ConstellationEdge>,
) -> Vec<EdgeView> {
    let points: HashMap<&str, ScreenPoint> =
        objects.iter().map(|o| (o.id.as_str(), o.screen)).collect();

    edges
        .into_iter()
        .filter_map(|edge| {
            let from = points.get(edge.from.as_str())?;
            let to = points.get(edge.to.as_str())?;
            (from.visible && to.visible).then(|| EdgeView {
                from: edge.from.clone(),
                to: edge.to.clone(),
                from_point: *from,
                to_point: *to,
            })
        })
        .collect()
}
