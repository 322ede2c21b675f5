//! Immediate movement and attribute helpers.
//!
//! Unlike [`crate::animate`], everything here takes effect at the call
//! site — these are the building blocks handler code uses to push
//! entities around, aim them, and toggle their visual attributes.
//!
//! Getters and setters operate on the entity's own components: for a
//! group member that is its local offset inside the group. Use
//! [`crate::systems::group::resolve_placement`] for stage-space values.
//!
//! Attribute setters validate synchronously — a negative scale or an
//! out-of-range opacity is rejected and nothing changes.

use bevy_ecs::prelude::{Entity, World};

use crate::components::flip::Flip;
use crate::components::opacity::Opacity;
use crate::components::position::Position;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::size::Size;
use crate::components::visibility::Visibility;
use crate::error::{Error, Result};
use crate::math::{Vec2, heading};
use crate::resources::input::pointer_position;
use crate::systems::group::resolve_placement;

pub fn get_x(world: &World, entity: Entity) -> Result<f32> {
    world
        .get::<Position>(entity)
        .map(|p| p.x)
        .ok_or(Error::NotStaged(entity))
}

pub fn get_y(world: &World, entity: Entity) -> Result<f32> {
    world
        .get::<Position>(entity)
        .map(|p| p.y)
        .ok_or(Error::NotStaged(entity))
}

pub fn get_position(world: &World, entity: Entity) -> Result<Vec2> {
    world
        .get::<Position>(entity)
        .map(|p| p.vec())
        .ok_or(Error::NotStaged(entity))
}

pub fn set_x(world: &mut World, entity: Entity, x: f32) -> Result<()> {
    let mut pos = world
        .get_mut::<Position>(entity)
        .ok_or(Error::NotStaged(entity))?;
    pos.x = x;
    Ok(())
}

pub fn set_y(world: &mut World, entity: Entity, y: f32) -> Result<()> {
    let mut pos = world
        .get_mut::<Position>(entity)
        .ok_or(Error::NotStaged(entity))?;
    pos.y = y;
    Ok(())
}

pub fn go_to_xy(world: &mut World, entity: Entity, x: f32, y: f32) -> Result<()> {
    let mut pos = world
        .get_mut::<Position>(entity)
        .ok_or(Error::NotStaged(entity))?;
    pos.x = x;
    pos.y = y;
    Ok(())
}

/// Move onto another entity's resolved stage-space position.
pub fn go_to(world: &mut World, entity: Entity, other: Entity) -> Result<()> {
    if world.get_entity(other).is_err() {
        return Err(Error::NotStaged(other));
    }
    let target = resolve_placement(world, other).position;
    go_to_xy(world, entity, target.x, target.y)
}

/// Move onto the pointer position observed this tick.
pub fn go_to_pointer(world: &mut World, entity: Entity) -> Result<()> {
    let pointer = pointer_position(world);
    go_to_xy(world, entity, pointer.x, pointer.y)
}

pub fn move_by(world: &mut World, entity: Entity, dx: f32, dy: f32) -> Result<()> {
    let mut pos = world
        .get_mut::<Position>(entity)
        .ok_or(Error::NotStaged(entity))?;
    pos.x += dx;
    pos.y += dy;
    Ok(())
}

/// Step `amount` pixels along the entity's facing. An unrotated entity
/// faces screen-right; clockwise rotation turns the facing with it.
pub fn move_forward(world: &mut World, entity: Entity, amount: f32) -> Result<()> {
    let degrees = get_rotation(world, entity)?;
    let step = heading(-degrees) * amount;
    move_by(world, entity, step.x, step.y)
}

pub fn move_backward(world: &mut World, entity: Entity, amount: f32) -> Result<()> {
    move_forward(world, entity, -amount)
}

pub fn get_rotation(world: &World, entity: Entity) -> Result<f32> {
    world
        .get::<Rotation>(entity)
        .map(|r| r.degrees)
        .ok_or(Error::NotStaged(entity))
}

pub fn set_rotation(world: &mut World, entity: Entity, degrees: f32) -> Result<()> {
    let mut rot = world
        .get_mut::<Rotation>(entity)
        .ok_or(Error::NotStaged(entity))?;
    rot.degrees = degrees;
    Ok(())
}

/// Turn clockwise on screen by `amount` degrees.
pub fn turn_right(world: &mut World, entity: Entity, amount: f32) -> Result<()> {
    let mut rot = world
        .get_mut::<Rotation>(entity)
        .ok_or(Error::NotStaged(entity))?;
    rot.degrees += amount;
    Ok(())
}

/// Turn counter-clockwise on screen by `amount` degrees.
pub fn turn_left(world: &mut World, entity: Entity, amount: f32) -> Result<()> {
    turn_right(world, entity, -amount)
}

/// Face the travel direction `degrees`, in the same counter-clockwise
/// convention as [`crate::animate::glide_in_direction`].
pub fn point_in_direction(world: &mut World, entity: Entity, degrees: f32) -> Result<()> {
    set_rotation(world, entity, -degrees)
}

/// Set both scale factors. Negative factors are rejected, state unchanged.
pub fn set_scale(world: &mut World, entity: Entity, sx: f32, sy: f32) -> Result<()> {
    if !sx.is_finite() || sx < 0.0 {
        return Err(Error::NegativeScale(sx));
    }
    if !sy.is_finite() || sy < 0.0 {
        return Err(Error::NegativeScale(sy));
    }
    let mut scale = world
        .get_mut::<Scale>(entity)
        .ok_or(Error::NotStaged(entity))?;
    scale.x = sx;
    scale.y = sy;
    Ok(())
}

/// Multiply both scale factors by `factor`.
pub fn grow(world: &mut World, entity: Entity, factor: f32) -> Result<()> {
    let current = world
        .get::<Scale>(entity)
        .copied()
        .ok_or(Error::NotStaged(entity))?;
    set_scale(world, entity, current.x * factor, current.y * factor)
}

pub fn set_opacity(world: &mut World, entity: Entity, alpha: f32) -> Result<()> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(Error::OpacityOutOfRange(alpha));
    }
    let mut opacity = world
        .get_mut::<Opacity>(entity)
        .ok_or(Error::NotStaged(entity))?;
    opacity.0 = alpha;
    Ok(())
}

pub fn show(world: &mut World, entity: Entity) -> Result<()> {
    let mut visibility = world
        .get_mut::<Visibility>(entity)
        .ok_or(Error::NotStaged(entity))?;
    visibility.0 = true;
    Ok(())
}

pub fn hide(world: &mut World, entity: Entity) -> Result<()> {
    let mut visibility = world
        .get_mut::<Visibility>(entity)
        .ok_or(Error::NotStaged(entity))?;
    visibility.0 = false;
    Ok(())
}

pub fn set_flip(world: &mut World, entity: Entity, horizontal: bool, vertical: bool) -> Result<()> {
    let mut flip = world
        .get_mut::<Flip>(entity)
        .ok_or(Error::NotStaged(entity))?;
    flip.horizontal = horizontal;
    flip.vertical = vertical;
    Ok(())
}

/// Effective width after the entity's own scale.
pub fn get_width(world: &World, entity: Entity) -> Result<f32> {
    let size = world
        .get::<Size>(entity)
        .ok_or(Error::NotStaged(entity))?;
    let scale = world.get::<Scale>(entity).copied().unwrap_or_default();
    Ok(size.width * scale.x)
}

/// Effective height after the entity's own scale.
pub fn get_height(world: &World, entity: Entity) -> Result<f32> {
    let size = world
        .get::<Size>(entity)
        .ok_or(Error::NotStaged(entity))?;
    let scale = world.get::<Scale>(entity).copied().unwrap_or_default();
    Ok(size.height * scale.y)
}
