//! User-registered event handlers.
//!
//! Five categories, each an insertion-ordered list. Registration order is
//! call order and is stable, which is what makes replay deterministic:
//! handlers always fire in the order the program registered them.
//!
//! The Director dispatches a category by taking its list out of the
//! resource, running it, and merging it back in front of anything that was
//! registered while it ran — so a handler registering into its own
//! category takes effect next tick, and order is preserved either way.

use bevy_ecs::prelude::{Entity, Resource, World};
use log::warn;
use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::math::Vec2;
use crate::resources::input::Key;

pub type StartFn = Box<dyn FnMut(&mut World) -> Result<()> + Send + Sync>;
pub type UpdateFn = Box<dyn FnMut(&mut World, f32) -> Result<()> + Send + Sync>;
pub type KeyFn = Box<dyn FnMut(&mut World, Key, f32) -> Result<()> + Send + Sync>;
pub type ClickFn = Box<dyn FnMut(&mut World, Vec2) -> Result<()> + Send + Sync>;
pub type PredicateFn = Box<dyn FnMut(&World) -> bool + Send + Sync>;
pub type ActionFn = Box<dyn FnMut(&mut World) -> Result<()> + Send + Sync>;

pub(crate) struct ClickHandler {
    /// When set, the handler only fires if the click hit-tests against
    /// this entity.
    pub target: Option<Entity>,
    pub func: ClickFn,
}

/// Edge-triggered predicate handler: the action fires exactly once each
/// time the predicate transitions from false to true.
pub(crate) struct Watcher {
    pub target: Option<Entity>,
    pub predicate: PredicateFn,
    pub action: ActionFn,
    pub was_true: bool,
}

#[derive(Resource, Default)]
pub struct Handlers {
    pub(crate) starting: Vec<StartFn>,
    pub(crate) updating: Vec<UpdateFn>,
    pub(crate) typing: Vec<KeyFn>,
    pub(crate) clicking: Vec<ClickHandler>,
    pub(crate) watching: Vec<Watcher>,
    /// Set once the first tick has dispatched the starting handlers.
    pub(crate) started: bool,
}

impl Handlers {
    /// Drop click handlers and watchers bound to removed entities.
    pub(crate) fn purge_entities(&mut self, gone: &FxHashSet<Entity>) {
        self.clicking
            .retain(|h| h.target.is_none_or(|t| !gone.contains(&t)));
        self.watching
            .retain(|w| w.target.is_none_or(|t| !gone.contains(&t)));
    }

    pub(crate) fn merge_starting(&mut self, mut dispatched: Vec<StartFn>) {
        dispatched.append(&mut self.starting);
        self.starting = dispatched;
    }

    pub(crate) fn merge_updating(&mut self, mut dispatched: Vec<UpdateFn>) {
        dispatched.append(&mut self.updating);
        self.updating = dispatched;
    }

    pub(crate) fn merge_typing(&mut self, mut dispatched: Vec<KeyFn>) {
        dispatched.append(&mut self.typing);
        self.typing = dispatched;
    }

    pub(crate) fn merge_clicking(&mut self, mut dispatched: Vec<ClickHandler>) {
        dispatched.append(&mut self.clicking);
        self.clicking = dispatched;
    }

    pub(crate) fn merge_watching(&mut self, mut dispatched: Vec<Watcher>) {
        dispatched.append(&mut self.watching);
        self.watching = dispatched;
    }
}

/// Register a lifecycle-start handler. Runs exactly once, on the first
/// tick; registering after that point is accepted but will never fire.
pub fn on_starting(
    world: &mut World,
    f: impl FnMut(&mut World) -> Result<()> + Send + Sync + 'static,
) {
    let mut handlers = world.resource_mut::<Handlers>();
    if handlers.started {
        warn!("starting handler registered after the first tick; it will never run");
    }
    handlers.starting.push(Box::new(f));
}

/// Register a per-tick update handler; receives the tick delta in seconds.
pub fn on_updating(
    world: &mut World,
    f: impl FnMut(&mut World, f32) -> Result<()> + Send + Sync + 'static,
) {
    world.resource_mut::<Handlers>().updating.push(Box::new(f));
}

/// Register a key-state handler. Fires once per currently-pressed key per
/// tick, keys in `Key` order.
pub fn on_typing(
    world: &mut World,
    f: impl FnMut(&mut World, Key, f32) -> Result<()> + Send + Sync + 'static,
) {
    world.resource_mut::<Handlers>().typing.push(Box::new(f));
}

/// Register a click handler that fires on every press transition.
pub fn on_clicking(
    world: &mut World,
    f: impl FnMut(&mut World, Vec2) -> Result<()> + Send + Sync + 'static,
) {
    world.resource_mut::<Handlers>().clicking.push(ClickHandler {
        target: None,
        func: Box::new(f),
    });
}

/// Register a click handler scoped to `target`: fires only when the click
/// position hit-tests against that entity's bounds.
pub fn on_clicking_entity(
    world: &mut World,
    target: Entity,
    f: impl FnMut(&mut World, Vec2) -> Result<()> + Send + Sync + 'static,
) {
    world.resource_mut::<Handlers>().clicking.push(ClickHandler {
        target: Some(target),
        func: Box::new(f),
    });
}

/// Register an edge-triggered predicate handler: `action` fires exactly
/// once each time `predicate` goes from false to true.
pub fn when(
    world: &mut World,
    predicate: impl FnMut(&World) -> bool + Send + Sync + 'static,
    action: impl FnMut(&mut World) -> Result<()> + Send + Sync + 'static,
) {
    world.resource_mut::<Handlers>().watching.push(Watcher {
        target: None,
        predicate: Box::new(predicate),
        action: Box::new(action),
        was_true: false,
    });
}

/// Entity-scoped [`when`]: skipped and purged once `target` leaves the
/// stage.
pub fn when_entity(
    world: &mut World,
    target: Entity,
    predicate: impl FnMut(&World) -> bool + Send + Sync + 'static,
    action: impl FnMut(&mut World) -> Result<()> + Send + Sync + 'static,
) {
    world.resource_mut::<Handlers>().watching.push(Watcher {
        target: Some(target),
        predicate: Box::new(predicate),
        action: Box::new(action),
        was_true: false,
    });
}
