//! Entity factories: pure data constructors for the drawable kinds.
//!
//! Each factory spawns the full Transform State bundle, appends the entity
//! to the stage roster (insertion order is z-order), and returns the
//! entity handle. Anchor conventions: rectangles, lines, and text anchor
//! at the top-left corner; circles and ellipses at their center.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::{Entity, World};
use log::debug;

use crate::components::anchor::Anchor;
use crate::components::animations::Animations;
use crate::components::flip::Flip;
use crate::components::opacity::Opacity;
use crate::components::position::Position;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::shape::{Color, Shape, ShapeKind};
use crate::components::size::Size;
use crate::components::visibility::Visibility;
use crate::error::{Error, Result};
use crate::resources::stage::Stage;
use crate::systems::group::resolve_placement;

/// Estimated advance width per glyph, as a fraction of the point size.
/// Real metrics belong to the renderer's font stack; this keeps text
/// hit-testable without one.
const TEXT_GLYPH_ASPECT: f32 = 0.6;
const TEXT_LINE_HEIGHT: f32 = 1.2;

fn ensure_extent(width: f32, height: f32) -> Result<()> {
    if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}

fn spawn_shape(
    world: &mut World,
    kind: ShapeKind,
    color: Color,
    anchor: Anchor,
    size: Size,
    x: f32,
    y: f32,
) -> Entity {
    let entity = world
        .spawn((
            Position::new(x, y),
            Rotation::default(),
            Scale::default(),
            Flip::default(),
            Opacity::default(),
            Visibility::default(),
            size,
            anchor,
            Shape::new(kind, color),
            Animations::default(),
        ))
        .id();
    world.resource_mut::<Stage>().insert(entity);
    debug!("spawned {entity} at ({x}, {y})");
    entity
}

/// Rectangle anchored at its top-left corner.
pub fn rectangle(
    world: &mut World,
    color: Color,
    width: f32,
    height: f32,
    x: f32,
    y: f32,
) -> Result<Entity> {
    ensure_extent(width, height)?;
    Ok(spawn_shape(
        world,
        ShapeKind::Rectangle,
        color,
        Anchor::TopLeft,
        Size::new(width, height),
        x,
        y,
    ))
}

/// Circle anchored at its center.
pub fn circle(world: &mut World, color: Color, radius: f32, x: f32, y: f32) -> Result<Entity> {
    ensure_extent(radius, radius)?;
    Ok(spawn_shape(
        world,
        ShapeKind::Circle { radius },
        color,
        Anchor::Center,
        Size::new(radius * 2.0, radius * 2.0),
        x,
        y,
    ))
}

/// Ellipse anchored at its center.
pub fn ellipse(
    world: &mut World,
    color: Color,
    width: f32,
    height: f32,
    x: f32,
    y: f32,
) -> Result<Entity> {
    ensure_extent(width, height)?;
    Ok(spawn_shape(
        world,
        ShapeKind::Ellipse,
        color,
        Anchor::Center,
        Size::new(width, height),
        x,
        y,
    ))
}

/// Line segment between two stage-space points. The entity anchors at the
/// top-left of the segment's bounding box.
pub fn line(
    world: &mut World,
    color: Color,
    thickness: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
) -> Result<Entity> {
    if !thickness.is_finite() || thickness <= 0.0 {
        return Err(Error::InvalidDimensions {
            width: thickness,
            height: thickness,
        });
    }
    let left = x1.min(x2);
    let top = y1.min(y2);
    let kind = ShapeKind::Line {
        x1: x1 - left,
        y1: y1 - top,
        x2: x2 - left,
        y2: y2 - top,
        thickness,
    };
    Ok(spawn_shape(
        world,
        kind,
        color,
        Anchor::TopLeft,
        Size::new((x2 - x1).abs(), (y2 - y1).abs()),
        left,
        top,
    ))
}

/// Text anchored at its top-left corner. Bounds are estimated from the
/// glyph count; real metrics live in the renderer.
pub fn text(
    world: &mut World,
    color: Color,
    content: impl Into<String>,
    point_size: f32,
    x: f32,
    y: f32,
) -> Result<Entity> {
    if !point_size.is_finite() || point_size <= 0.0 {
        return Err(Error::InvalidDimensions {
            width: point_size,
            height: point_size,
        });
    }
    let content = content.into();
    let width = content.chars().count() as f32 * point_size * TEXT_GLYPH_ASPECT;
    let height = point_size * TEXT_LINE_HEIGHT;
    Ok(spawn_shape(
        world,
        ShapeKind::Text {
            content,
            point_size,
        },
        color,
        Anchor::TopLeft,
        Size::new(width, height),
        x,
        y,
    ))
}

/// Group the given entities under a new container whose origin is
/// `(x, y)`. Member positions are rewritten to offsets from that origin,
/// so moving, rotating, or scaling the group carries the members with it,
/// pivoting around the origin. Destroying the group destroys its members.
pub fn group(world: &mut World, members: &[Entity], x: f32, y: f32) -> Result<Entity> {
    for &member in members {
        if world.get_entity(member).is_err() {
            return Err(Error::NotStaged(member));
        }
    }

    let container = world
        .spawn((
            Position::new(x, y),
            Rotation::default(),
            Scale::default(),
            Visibility::default(),
            Animations::default(),
        ))
        .id();
    world.resource_mut::<Stage>().insert(container);

    for &member in members {
        let current = resolve_placement(world, member).position;
        if let Some(mut pos) = world.get_mut::<Position>(member) {
            pos.x = current.x - x;
            pos.y = current.y - y;
        }
        world.entity_mut(member).insert(ChildOf(container));
    }
    debug!("grouped {} entities under {container}", members.len());
    Ok(container)
}
