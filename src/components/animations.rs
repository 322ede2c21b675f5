//! Animation tasks owned by an entity.
//!
//! Each entity carries an [`Animations`] component holding zero or more
//! [`AnimationTask`]s. A task is created from an [`Animation`] spec (builder
//! API), advances once per tick in schedule order, and moves through an
//! explicit state machine:
//!
//! `Scheduled → Running → (Completed | Cancelled)`
//!
//! Terminal tasks are swept out of the active list at the end of the
//! scheduler pass and their outcome is recorded so callers can still ask
//! what happened to a task id. See [`crate::systems::animation`] for the
//! per-tick algorithm and [`crate::animate`] for the verb-style API.

use bevy_ecs::prelude::{Component, Entity, World};
use smallvec::SmallVec;

use crate::math::{Vec2, heading};
use crate::systems::group::Placement;

/// Identifier of a task within its owning entity. Never reused.
pub type TaskId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Scheduled,
    Running,
    Completed,
    Cancelled,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Cancelled)
    }
}

/// Per-tick delta produced by a custom step function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Step {
    pub dx: f32,
    pub dy: f32,
    /// Degrees to add to the rotation this tick, clockwise positive.
    pub turn: f32,
}

/// Custom per-tick delta function: receives the tick delta in seconds and
/// the entity's current resolved placement, returns the delta to apply.
pub type StepFn = Box<dyn FnMut(f32, &Placement) -> Step + Send + Sync>;

/// Termination predicate, evaluated each tick after the delta is applied.
pub type UntilFn = Box<dyn FnMut(&World, Entity) -> bool + Send + Sync>;

/// What the task does to its entity each tick.
pub enum Motion {
    /// Interpolate position from the value captured at start toward `to`.
    /// Duration-bound; the final tick snaps exactly onto `to`.
    Glide { from: Option<Vec2>, to: Vec2 },
    /// Move along a fixed heading at `speed` pixels per second.
    Drift { heading: Vec2, speed: f32 },
    /// Rotate at a fixed rate from the angle captured at start.
    Spin {
        degrees_per_sec: f32,
        from: Option<f32>,
    },
    /// Let time pass without touching the entity.
    Hold,
    Custom(StepFn),
}

impl std::fmt::Debug for Motion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Motion::Glide { from, to } => {
                f.debug_struct("Glide").field("from", from).field("to", to).finish()
            }
            Motion::Drift { heading, speed } => f
                .debug_struct("Drift")
                .field("heading", heading)
                .field("speed", speed)
                .finish(),
            Motion::Spin {
                degrees_per_sec,
                from,
            } => f
                .debug_struct("Spin")
                .field("degrees_per_sec", degrees_per_sec)
                .field("from", from)
                .finish(),
            Motion::Hold => f.write_str("Hold"),
            Motion::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Builder for an animation task, consumed by [`crate::animate::animate`].
///
/// ```ignore
/// animate(world, ball, Animation::drift(90.0, 120.0).until(|w, e| {
///     motion::get_y(w, e).is_ok_and(|y| y <= 0.0)
/// }))?;
/// ```
pub struct Animation {
    pub(crate) motion: Motion,
    pub(crate) duration: Option<f32>,
    pub(crate) until: Option<UntilFn>,
}

impl Animation {
    /// Linear glide to `(x, y)` over `duration` seconds.
    pub fn glide_to(x: f32, y: f32, duration: f32) -> Self {
        Self {
            motion: Motion::Glide {
                from: None,
                to: Vec2::new(x, y),
            },
            duration: Some(duration),
            until: None,
        }
    }

    /// Directional glide: `degrees` counter-clockwise from screen-right,
    /// `speed` in pixels per second. Open-ended until limited by
    /// [`for_seconds`](Self::for_seconds), an [`until`](Self::until)
    /// predicate, or an explicit stop.
    pub fn drift(degrees: f32, speed: f32) -> Self {
        Self {
            motion: Motion::Drift {
                heading: heading(degrees),
                speed,
            },
            duration: None,
            until: None,
        }
    }

    /// Spin at `degrees_per_sec`, clockwise positive. Open-ended until
    /// limited or stopped.
    pub fn spin(degrees_per_sec: f32) -> Self {
        Self {
            motion: Motion::Spin {
                degrees_per_sec,
                from: None,
            },
            duration: None,
            until: None,
        }
    }

    /// Timed pause: occupies the scheduler for `duration` seconds without
    /// touching the entity.
    pub fn hold(duration: f32) -> Self {
        Self {
            motion: Motion::Hold,
            duration: Some(duration),
            until: None,
        }
    }

    /// Custom per-tick delta function.
    pub fn custom(f: impl FnMut(f32, &Placement) -> Step + Send + Sync + 'static) -> Self {
        Self {
            motion: Motion::Custom(Box::new(f)),
            duration: None,
            until: None,
        }
    }

    /// Bound the task to `duration` seconds.
    pub fn for_seconds(mut self, duration: f32) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Complete the task on the first tick `predicate` returns true,
    /// checked after that tick's delta has been applied.
    pub fn until(mut self, predicate: impl FnMut(&World, Entity) -> bool + Send + Sync + 'static) -> Self {
        self.until = Some(Box::new(predicate));
        self
    }
}

/// A scheduled or running animation, owned by exactly one entity.
pub struct AnimationTask {
    pub id: TaskId,
    pub state: TaskState,
    pub(crate) motion: Motion,
    pub(crate) duration: Option<f32>,
    pub(crate) until: Option<UntilFn>,
    /// Frame index recorded when the task entered `Running`.
    pub started_at: u64,
    /// Ticks this task has actually advanced. Frozen while the entity is
    /// paused; progress is `frames_run * interval / duration` so completion
    /// does not drift with float accumulation.
    pub(crate) frames_run: u32,
}

/// Task list component. Tasks advance in schedule order, so of two tasks
/// fighting over the same attribute the later-scheduled one applies last
/// and wins for that tick.
#[derive(Component, Default)]
pub struct Animations {
    pub(crate) tasks: SmallVec<[AnimationTask; 2]>,
    /// Outcomes of terminal tasks, kept so `task_state` stays answerable.
    settled: SmallVec<[(TaskId, TaskState); 4]>,
    next_id: TaskId,
    /// While true the entity's task clocks are frozen (not reset).
    pub paused: bool,
}

impl Animations {
    pub fn schedule(&mut self, spec: Animation) -> TaskId {
        self.next_id += 1;
        let id = self.next_id;
        self.tasks.push(AnimationTask {
            id,
            state: TaskState::Scheduled,
            motion: spec.motion,
            duration: spec.duration,
            until: spec.until,
            started_at: 0,
            frames_run: 0,
        });
        id
    }

    /// Number of tasks not yet in a terminal state.
    pub fn active(&self) -> usize {
        self.tasks.len()
    }

    /// Mark one task cancelled. Returns false if the id is not active.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.state = TaskState::Cancelled;
                self.sweep();
                true
            }
            None => false,
        }
    }

    /// Cancel and discard every task, leaving the entity's Transform State
    /// at its last applied value.
    pub fn cancel_all(&mut self) {
        for task in &mut self.tasks {
            task.state = TaskState::Cancelled;
        }
        self.sweep();
    }

    /// State of a task: active state, or the recorded outcome if it already
    /// finished. `None` for ids this entity never issued.
    pub fn task_state(&self, id: TaskId) -> Option<TaskState> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.state)
            .or_else(|| {
                self.settled
                    .iter()
                    .find(|(sid, _)| *sid == id)
                    .map(|(_, state)| *state)
            })
    }

    /// Drop terminal tasks from the active list, recording their outcome.
    pub(crate) fn sweep(&mut self) {
        for task in &self.tasks {
            if task.state.is_terminal() {
                self.settled.push((task.id, task.state));
            }
        }
        self.tasks.retain(|t| !t.state.is_terminal());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_assigns_fresh_ids() {
        let mut anims = Animations::default();
        let a = anims.schedule(Animation::hold(1.0));
        let b = anims.schedule(Animation::spin(90.0));
        assert_ne!(a, b);
        assert_eq!(anims.active(), 2);
        assert_eq!(anims.task_state(a), Some(TaskState::Scheduled));
    }

    #[test]
    fn test_cancel_moves_task_to_settled() {
        let mut anims = Animations::default();
        let id = anims.schedule(Animation::hold(1.0));
        assert!(anims.cancel(id));
        assert_eq!(anims.active(), 0);
        assert_eq!(anims.task_state(id), Some(TaskState::Cancelled));
        // cancelling again is a no-op on an already-settled id
        assert!(!anims.cancel(id));
    }

    #[test]
    fn test_cancel_all_discards_everything() {
        let mut anims = Animations::default();
        let a = anims.schedule(Animation::glide_to(10.0, 10.0, 1.0));
        let b = anims.schedule(Animation::spin(45.0));
        anims.cancel_all();
        assert_eq!(anims.active(), 0);
        assert_eq!(anims.task_state(a), Some(TaskState::Cancelled));
        assert_eq!(anims.task_state(b), Some(TaskState::Cancelled));
    }

    #[test]
    fn test_unknown_id_has_no_state() {
        let anims = Animations::default();
        assert_eq!(anims.task_state(99), None);
    }

    #[test]
    fn test_builder_sets_duration_and_predicate() {
        let spec = Animation::drift(0.0, 100.0).for_seconds(2.0);
        assert_eq!(spec.duration, Some(2.0));
        assert!(spec.until.is_none());

        let spec = Animation::spin(90.0).until(|_, _| true);
        assert!(spec.duration.is_none());
        assert!(spec.until.is_some());
    }

    #[test]
    fn test_terminal_states() {
        assert!(TaskState::Completed.is_terminal());
        assert!(TaskState::Cancelled.is_terminal());
        assert!(!TaskState::Scheduled.is_terminal());
        assert!(!TaskState::Running.is_terminal());
    }
}
