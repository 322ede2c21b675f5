//! Placement resolution for grouped entities.
//!
//! Group membership uses the ECS hierarchy ([`ChildOf`]/`Children`). A
//! member's [`Position`] is its local offset from the group origin, so
//! moving, rotating, or scaling the group carries every member with it,
//! pivoting around the group's own position.
//!
//! Resolution is pull-based: collision tests, hit-tests, and the snapshot
//! compose the chain on demand, top-down (offset scaled by the parent's
//! scale, then rotated by the parent's rotation), so a query issued from
//! handler code right after a move sees the move, never a stale cache.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::{Entity, World};

use crate::components::position::Position;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::math::{Vec2, rotate};

/// Resolved stage-space transform of an entity, with every ancestor
/// group's motion composed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

/// Compose an entity's local transform with all ancestor groups.
///
/// Entities outside any group resolve to their own components. Missing
/// components fall back to identity values.
pub fn resolve_placement(world: &World, entity: Entity) -> Placement {
    let position = world
        .get::<Position>(entity)
        .map(|p| p.vec())
        .unwrap_or_default();
    let rotation = world
        .get::<Rotation>(entity)
        .map(|r| r.degrees)
        .unwrap_or(0.0);
    let scale = world
        .get::<Scale>(entity)
        .map(|s| Vec2::new(s.x, s.y))
        .unwrap_or(Vec2::new(1.0, 1.0));

    match world.get::<ChildOf>(entity) {
        Some(child_of) => {
            let parent = resolve_placement(world, child_of.parent());
            compose(&parent, position, rotation, scale)
        }
        None => Placement {
            position,
            rotation,
            scale,
        },
    }
}

/// Compose a local transform under a parent placement: the local offset is
/// scaled by the parent's scale, rotated by the parent's rotation, and
/// added to the parent's position; angles add, scales multiply.
fn compose(parent: &Placement, offset: Vec2, rotation: f32, scale: Vec2) -> Placement {
    let scaled = Vec2::new(offset.x * parent.scale.x, offset.y * parent.scale.y);
    let rotated = rotate(scaled, parent.rotation);
    Placement {
        position: parent.position + rotated,
        rotation: parent.rotation + rotation,
        scale: Vec2::new(parent.scale.x * scale.x, parent.scale.y * scale.y),
    }
}
