//! Verb-style animation API.
//!
//! These helpers wrap [`Animation`] specs and schedule them on an entity's
//! [`Animations`] component. The edge-seeking verbs (`glide_right` and
//! friends) mirror how students think about motion: give a speed, the
//! duration falls out of the distance to the stage edge.
//!
//! Everything validates synchronously: bad durations and speeds are
//! rejected before any task is created, and animating an entity that has
//! left the stage is [`Error::NotStaged`], not a silent no-op.

use bevy_ecs::prelude::{Entity, World};
use log::debug;

use crate::components::animations::{Animation, Animations, Step, TaskId, TaskState};
use crate::components::position::Position;
use crate::error::{Error, Result};
use crate::resources::frameclock::FrameClock;
use crate::resources::stage::Stage;
use crate::resources::stageconfig::StageConfig;

fn ensure_staged(world: &World, entity: Entity) -> Result<()> {
    if world.get_entity(entity).is_err() {
        return Err(Error::NotStaged(entity));
    }
    Ok(())
}

fn ensure_speed(speed: f32) -> Result<()> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(Error::NonPositiveSpeed(speed));
    }
    Ok(())
}

/// Schedule an [`Animation`] spec on `entity` and return the task id.
pub fn animate(world: &mut World, entity: Entity, spec: Animation) -> Result<TaskId> {
    ensure_staged(world, entity)?;
    if let Some(duration) = spec.duration
        && (!duration.is_finite() || duration <= 0.0)
    {
        return Err(Error::NonPositiveDuration(duration));
    }

    if world.get::<Animations>(entity).is_none() {
        world.entity_mut(entity).insert(Animations::default());
    }
    let Some(mut anims) = world.get_mut::<Animations>(entity) else {
        return Err(Error::NotStaged(entity));
    };
    let id = anims.schedule(spec);
    debug!("scheduled task {id} on {entity}");
    Ok(id)
}

/// Glide to `(x, y)` over `duration` seconds; arrival is exact.
pub fn glide_to(world: &mut World, entity: Entity, x: f32, y: f32, duration: f32) -> Result<TaskId> {
    animate(world, entity, Animation::glide_to(x, y, duration))
}

/// Duration to cover `distance` at `speed`, floored to one tick so a
/// glide scheduled at the edge still completes.
fn travel_time(world: &World, distance: f32, speed: f32) -> f32 {
    let interval = world.resource::<FrameClock>().interval;
    (distance.abs() / speed).max(interval)
}

/// Glide until the anchor reaches the right stage edge, at `speed` px/s.
pub fn glide_right(world: &mut World, entity: Entity, speed: f32) -> Result<TaskId> {
    ensure_speed(speed)?;
    ensure_staged(world, entity)?;
    let pos = world
        .get::<Position>(entity)
        .copied()
        .ok_or(Error::NotStaged(entity))?;
    let edge = world.resource::<Stage>().width;
    let duration = travel_time(world, edge - pos.x, speed);
    glide_to(world, entity, edge, pos.y, duration)
}

/// Glide until the anchor reaches the left stage edge, at `speed` px/s.
pub fn glide_left(world: &mut World, entity: Entity, speed: f32) -> Result<TaskId> {
    ensure_speed(speed)?;
    ensure_staged(world, entity)?;
    let pos = world
        .get::<Position>(entity)
        .copied()
        .ok_or(Error::NotStaged(entity))?;
    let duration = travel_time(world, pos.x, speed);
    glide_to(world, entity, 0.0, pos.y, duration)
}

/// Glide until the anchor reaches the top stage edge, at `speed` px/s.
pub fn glide_up(world: &mut World, entity: Entity, speed: f32) -> Result<TaskId> {
    ensure_speed(speed)?;
    ensure_staged(world, entity)?;
    let pos = world
        .get::<Position>(entity)
        .copied()
        .ok_or(Error::NotStaged(entity))?;
    let duration = travel_time(world, pos.y, speed);
    glide_to(world, entity, pos.x, 0.0, duration)
}

/// Glide until the anchor reaches the bottom stage edge, at `speed` px/s.
pub fn glide_down(world: &mut World, entity: Entity, speed: f32) -> Result<TaskId> {
    ensure_speed(speed)?;
    ensure_staged(world, entity)?;
    let pos = world
        .get::<Position>(entity)
        .copied()
        .ok_or(Error::NotStaged(entity))?;
    let edge = world.resource::<Stage>().height;
    let duration = travel_time(world, edge - pos.y, speed);
    glide_to(world, entity, pos.x, edge, duration)
}

/// Open-ended directional glide: `degrees` counter-clockwise from
/// screen-right, `speed` px/s. Runs until stopped or bounded via a
/// predicate on the returned spec.
pub fn glide_in_direction(
    world: &mut World,
    entity: Entity,
    degrees: f32,
    speed: f32,
) -> Result<TaskId> {
    ensure_speed(speed)?;
    animate(world, entity, Animation::drift(degrees, speed))
}

/// Jitter around the current position by up to `amount` pixels per tick.
/// Seeded from the stage configuration so replays are identical.
pub fn glide_around(world: &mut World, entity: Entity, amount: f32) -> Result<TaskId> {
    ensure_speed(amount)?;
    ensure_staged(world, entity)?;
    let seed = world
        .get_resource::<StageConfig>()
        .map(|c| c.seed)
        .unwrap_or(1);
    let mut rng = fastrand::Rng::with_seed(seed ^ entity.to_bits());
    animate(
        world,
        entity,
        Animation::custom(move |_dt, _placement| Step {
            dx: (rng.f32() * 2.0 - 1.0) * amount,
            dy: (rng.f32() * 2.0 - 1.0) * amount,
            turn: 0.0,
        }),
    )
}

/// Spin at `degrees_per_sec` (clockwise positive) until stopped.
pub fn spin(world: &mut World, entity: Entity, degrees_per_sec: f32) -> Result<TaskId> {
    animate(world, entity, Animation::spin(degrees_per_sec))
}

/// Spin at `degrees_per_sec` for `duration` seconds; the final angle is
/// exactly the start plus the full sweep.
pub fn spin_for(
    world: &mut World,
    entity: Entity,
    degrees_per_sec: f32,
    duration: f32,
) -> Result<TaskId> {
    animate(world, entity, Animation::spin(degrees_per_sec).for_seconds(duration))
}

/// Timed pause occupying the scheduler without touching the entity.
pub fn hold(world: &mut World, entity: Entity, duration: f32) -> Result<TaskId> {
    animate(world, entity, Animation::hold(duration))
}

/// Suspend all of the entity's tasks; their clocks freeze where they are.
pub fn pause(world: &mut World, entity: Entity) -> Result<()> {
    ensure_staged(world, entity)?;
    if let Some(mut anims) = world.get_mut::<Animations>(entity) {
        anims.paused = true;
    }
    Ok(())
}

/// Resume a paused entity's tasks from where they froze.
pub fn resume(world: &mut World, entity: Entity) -> Result<()> {
    ensure_staged(world, entity)?;
    if let Some(mut anims) = world.get_mut::<Animations>(entity) {
        anims.paused = false;
    }
    Ok(())
}

/// Cancel and discard all of the entity's tasks. Transform State stays at
/// its last applied value; stopping twice (or pausing after a stop) is a
/// no-op.
pub fn stop(world: &mut World, entity: Entity) -> Result<()> {
    ensure_staged(world, entity)?;
    if let Some(mut anims) = world.get_mut::<Animations>(entity) {
        anims.cancel_all();
        debug!("cancelled all tasks on {entity}");
    }
    Ok(())
}

/// Cancel one task by id. Returns whether the id was still active.
pub fn stop_task(world: &mut World, entity: Entity, id: TaskId) -> Result<bool> {
    ensure_staged(world, entity)?;
    match world.get_mut::<Animations>(entity) {
        Some(mut anims) => Ok(anims.cancel(id)),
        None => Ok(false),
    }
}

/// State of a task: active state, recorded outcome, or `None` for an id
/// the entity never issued.
pub fn task_state(world: &World, entity: Entity, id: TaskId) -> Result<Option<TaskState>> {
    ensure_staged(world, entity)?;
    Ok(world
        .get::<Animations>(entity)
        .and_then(|anims| anims.task_state(id)))
}

/// Number of tasks not yet completed or cancelled.
pub fn active_animations(world: &World, entity: Entity) -> Result<usize> {
    ensure_staged(world, entity)?;
    Ok(world
        .get::<Animations>(entity)
        .map(|anims| anims.active())
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_world() -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(Stage::new(800.0, 600.0).unwrap());
        world.insert_resource(FrameClock::new(60).unwrap());
        let e = world
            .spawn((Position::new(100.0, 100.0), Animations::default()))
            .id();
        world.resource_mut::<Stage>().insert(e);
        (world, e)
    }

    #[test]
    fn test_animate_rejects_bad_duration() {
        let (mut world, e) = make_world();
        assert!(matches!(
            glide_to(&mut world, e, 0.0, 0.0, 0.0),
            Err(Error::NonPositiveDuration(_))
        ));
        assert!(matches!(
            glide_to(&mut world, e, 0.0, 0.0, -2.0),
            Err(Error::NonPositiveDuration(_))
        ));
        assert_eq!(active_animations(&world, e).unwrap(), 0);
    }

    #[test]
    fn test_animate_rejects_despawned_entity() {
        let (mut world, e) = make_world();
        world.despawn(e);
        assert!(matches!(
            spin(&mut world, e, 90.0),
            Err(Error::NotStaged(_))
        ));
    }

    #[test]
    fn test_glide_right_duration_from_distance() {
        let (mut world, e) = make_world();
        let id = glide_right(&mut world, e, 350.0).unwrap();
        // distance 700 at 350 px/s: a 2 second glide
        let anims = world.get::<Animations>(e).unwrap();
        assert_eq!(anims.task_state(id), Some(TaskState::Scheduled));
        assert_eq!(anims.active(), 1);
    }

    #[test]
    fn test_glide_speed_must_be_positive() {
        let (mut world, e) = make_world();
        assert!(matches!(
            glide_right(&mut world, e, 0.0),
            Err(Error::NonPositiveSpeed(_))
        ));
        assert!(matches!(
            glide_up(&mut world, e, -5.0),
            Err(Error::NonPositiveSpeed(_))
        ));
    }

    #[test]
    fn test_stop_task_reports_activity() {
        let (mut world, e) = make_world();
        let id = spin(&mut world, e, 45.0).unwrap();
        assert!(stop_task(&mut world, e, id).unwrap());
        assert!(!stop_task(&mut world, e, id).unwrap());
        assert_eq!(
            task_state(&world, e, id).unwrap(),
            Some(TaskState::Cancelled)
        );
    }

    #[test]
    fn test_animate_inserts_component_when_missing() {
        let (mut world, _) = make_world();
        let bare = world.spawn(Position::new(0.0, 0.0)).id();
        world.resource_mut::<Stage>().insert(bare);
        let id = hold(&mut world, bare, 1.0).unwrap();
        assert_eq!(
            task_state(&world, bare, id).unwrap(),
            Some(TaskState::Scheduled)
        );
    }
}
