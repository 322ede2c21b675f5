//! On-demand overlap queries.
//!
//! The detector is stateless: every query derives an axis-aligned bounding
//! rectangle from the entity's resolved Transform State at call time.
//! Rotation and mirror flags are intentionally ignored for the bounding
//! test; students get a rectangle they can predict. Hidden entities never
//! overlap anything. No spatial index — entity counts are small and
//! queries come from handler code, not from an exhaustive sweep.

use bevy_ecs::prelude::{Entity, World};

use crate::components::anchor::Anchor;
use crate::components::size::Size;
use crate::components::visibility::Visibility;
use crate::error::{Error, Result};
use crate::math::Vec2;
use crate::resources::input::pointer_position;
use crate::systems::group::resolve_placement;

/// Axis-aligned bounding rectangle in stage space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    /// Interval-overlap test on both axes. Touching edges count as
    /// overlapping.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }

    /// Point containment, edges inclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// Bounding rectangle of an entity from its resolved placement: base size
/// times scale, positioned per the entity's anchor convention.
pub fn bounds(world: &World, entity: Entity) -> Result<Bounds> {
    if world.get_entity(entity).is_err() {
        return Err(Error::NotStaged(entity));
    }
    let placement = resolve_placement(world, entity);
    let size = world.get::<Size>(entity).copied().unwrap_or_default();
    let anchor = world.get::<Anchor>(entity).copied().unwrap_or_default();

    let w = size.width * placement.scale.x;
    let h = size.height * placement.scale.y;
    let (left, top) = match anchor {
        Anchor::TopLeft => (placement.position.x, placement.position.y),
        Anchor::Center => (
            placement.position.x - w * 0.5,
            placement.position.y - h * 0.5,
        ),
    };
    Ok(Bounds {
        left,
        top,
        right: left + w,
        bottom: top + h,
    })
}

fn is_visible(world: &World, entity: Entity) -> bool {
    world
        .get::<Visibility>(entity)
        .map(|v| v.0)
        .unwrap_or(true)
}

/// Whether two entities' bounding rectangles overlap. Symmetric; hidden
/// entities never overlap anything.
pub fn colliding(world: &World, a: Entity, b: Entity) -> Result<bool> {
    let bounds_a = bounds(world, a)?;
    let bounds_b = bounds(world, b)?;
    if !is_visible(world, a) || !is_visible(world, b) {
        return Ok(false);
    }
    Ok(bounds_a.overlaps(&bounds_b))
}

/// Whether a stage-space point falls inside the entity's bounding
/// rectangle. Hidden entities contain nothing.
pub fn colliding_point(world: &World, entity: Entity, x: f32, y: f32) -> Result<bool> {
    let b = bounds(world, entity)?;
    if !is_visible(world, entity) {
        return Ok(false);
    }
    Ok(b.contains(Vec2::new(x, y)))
}

/// Point query against the pointer position observed this tick.
pub fn colliding_with_pointer(world: &World, entity: Entity) -> Result<bool> {
    let pointer = pointer_position(world);
    colliding_point(world, entity, pointer.x, pointer.y)
}

/// Hit-test used by click dispatch: like [`colliding_point`] but a dead
/// target is simply a miss, not an error (the click raced the removal).
pub(crate) fn hit_test(world: &World, entity: Entity, point: Vec2) -> bool {
    colliding_point(world, entity, point.x, point.y).unwrap_or(false)
}
