//! Read-only per-tick scene view for the external renderer.
//!
//! Entities appear in roster order (insertion order = z-order); group
//! members are listed with their resolved stage-space placement. Entities
//! without a [`Shape`] (group containers) serialize with `shape: null` so
//! a renderer can skip them.

use bevy_ecs::prelude::{Entity, World};
use serde::Serialize;

use crate::components::anchor::Anchor;
use crate::components::flip::Flip;
use crate::components::opacity::Opacity;
use crate::components::shape::{Color, Shape};
use crate::components::size::Size;
use crate::components::visibility::Visibility;
use crate::resources::frameclock::FrameClock;
use crate::resources::stage::Stage;
use crate::systems::group::resolve_placement;

#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    /// Stable identifier of the underlying entity.
    pub id: u64,
    pub shape: Option<Shape>,
    /// Resolved anchor position in stage space.
    pub x: f32,
    pub y: f32,
    pub anchor: AnchorView,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub opacity: f32,
    pub visible: bool,
    /// Effective bounds after scale.
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum AnchorView {
    TopLeft,
    Center,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub frame: u64,
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub entities: Vec<EntityView>,
}

/// Capture the current scene in draw order.
pub fn snapshot(world: &World) -> SceneSnapshot {
    let stage = world.resource::<Stage>();
    let clock = world.resource::<FrameClock>();

    let entities = stage
        .order()
        .iter()
        .filter_map(|&entity| entity_view(world, entity))
        .collect();

    SceneSnapshot {
        frame: clock.frame,
        width: stage.width,
        height: stage.height,
        background: stage.background,
        entities,
    }
}

fn entity_view(world: &World, entity: Entity) -> Option<EntityView> {
    world.get_entity(entity).ok()?;
    let placement = resolve_placement(world, entity);
    let size = world.get::<Size>(entity).copied().unwrap_or_default();
    let flip = world.get::<Flip>(entity).copied().unwrap_or_default();
    let anchor = world.get::<Anchor>(entity).copied().unwrap_or_default();

    Some(EntityView {
        id: entity.to_bits(),
        shape: world.get::<Shape>(entity).cloned(),
        x: placement.position.x,
        y: placement.position.y,
        anchor: match anchor {
            Anchor::TopLeft => AnchorView::TopLeft,
            Anchor::Center => AnchorView::Center,
        },
        rotation: placement.rotation,
        scale_x: placement.scale.x,
        scale_y: placement.scale.y,
        flip_horizontal: flip.horizontal,
        flip_vertical: flip.vertical,
        opacity: world.get::<Opacity>(entity).map(|o| o.0).unwrap_or(1.0),
        visible: world.get::<Visibility>(entity).map(|v| v.0).unwrap_or(true),
        width: size.width * placement.scale.x,
        height: size.height * placement.scale.y,
    })
}
