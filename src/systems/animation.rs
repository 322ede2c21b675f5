//! The animation scheduler: advances every entity's task list once per
//! tick.
//!
//! Runs as an exclusive-world pass so termination predicates can read
//! arbitrary world state. Per entity the task list is taken out of the
//! component, advanced task by task in schedule order, swept of terminal
//! tasks, and put back.
//!
//! Timing rules:
//! - Progress of a duration-bound task is `frames_run * interval /
//!   duration` — a frame-count multiplication, so completion is exact and
//!   does not drift with accumulated float error.
//! - Duration-bound kinds (`Glide`, `Spin` with a duration) recompute
//!   their attribute absolutely from the value captured when the task
//!   started, and snap exactly onto the requested target on the final
//!   tick.
//! - Open-ended kinds (`Drift`, `Custom`) contribute per-tick deltas.
//! - Termination predicates run after the tick's delta, so the final
//!   frame still shows motion.
//!
//! Conflicting tasks on the same attribute resolve by schedule order: the
//! later-scheduled task applies after the earlier one and wins for that
//! tick. Disjoint attributes compose.

use bevy_ecs::prelude::{Entity, World};
use log::debug;

use crate::components::animations::{Animations, Motion, TaskState};
use crate::components::position::Position;
use crate::components::rotation::Rotation;
use crate::resources::frameclock::FrameClock;
use crate::resources::stage::Stage;
use crate::systems::group::resolve_placement;

/// Advance all animation tasks of every staged entity, in roster order.
///
/// Entities marked for removal this tick and paused entities are skipped;
/// pausing freezes task clocks without resetting them.
pub fn advance_animations(world: &mut World) {
    let clock = *world.resource::<FrameClock>();
    let stage = world.resource::<Stage>();
    let order: Vec<Entity> = stage.order().to_vec();
    let doomed = stage.doomed_set();

    for entity in order {
        if doomed.contains(&entity) {
            continue;
        }
        let taken = match world.get_entity_mut(entity) {
            Ok(mut entry) => entry.take::<Animations>(),
            Err(_) => None,
        };
        let Some(mut anims) = taken else {
            continue;
        };
        if anims.paused {
            if let Ok(mut entry) = world.get_entity_mut(entity) {
                entry.insert(anims);
            }
            continue;
        }

        for task in anims.tasks.iter_mut() {
            match task.state {
                TaskState::Scheduled => {
                    task.state = TaskState::Running;
                    task.started_at = clock.frame;
                }
                TaskState::Running => {}
                TaskState::Completed | TaskState::Cancelled => continue,
            }

            task.frames_run += 1;
            let elapsed = task.frames_run as f32 * clock.interval;
            let progress = task.duration.map(|d| (elapsed / d).min(1.0));
            let done = progress.is_some_and(|p| p >= 1.0);

            match &mut task.motion {
                Motion::Glide { from, to } => {
                    if let Some(mut pos) = world.get_mut::<Position>(entity) {
                        let start = *from.get_or_insert(pos.vec());
                        if done {
                            pos.set(*to);
                        } else {
                            let p = progress.unwrap_or(1.0);
                            pos.set(crate::math::lerp_v2(start, *to, p));
                        }
                    }
                }
                Motion::Drift { heading, speed } => {
                    if let Some(mut pos) = world.get_mut::<Position>(entity) {
                        let delta = *heading * (*speed * clock.interval);
                        pos.x += delta.x;
                        pos.y += delta.y;
                    }
                }
                Motion::Spin {
                    degrees_per_sec,
                    from,
                } => {
                    if let Some(mut rot) = world.get_mut::<Rotation>(entity) {
                        let start = *from.get_or_insert(rot.degrees);
                        if done {
                            // exact total sweep, not the accumulated value
                            rot.degrees = start + *degrees_per_sec * task.duration.unwrap_or(0.0);
                        } else {
                            rot.degrees = start + *degrees_per_sec * elapsed;
                        }
                    }
                }
                Motion::Hold => {}
                Motion::Custom(step_fn) => {
                    let placement = resolve_placement(world, entity);
                    let step = step_fn(clock.interval, &placement);
                    if let Some(mut pos) = world.get_mut::<Position>(entity) {
                        pos.x += step.dx;
                        pos.y += step.dy;
                    }
                    if step.turn != 0.0
                        && let Some(mut rot) = world.get_mut::<Rotation>(entity)
                    {
                        rot.degrees += step.turn;
                    }
                }
            }

            if done {
                task.state = TaskState::Completed;
                debug!("task {} on {entity} completed after {} frames", task.id, task.frames_run);
            } else if let Some(predicate) = task.until.as_mut()
                && predicate(&*world, entity)
            {
                // checked after the delta so the final frame still moves
                task.state = TaskState::Completed;
                debug!("task {} on {entity} completed by predicate", task.id);
            }
        }

        anims.sweep();
        if let Ok(mut entry) = world.get_entity_mut(entity) {
            entry.insert(anims);
        }
    }
}
