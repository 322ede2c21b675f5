//! The Director: owner of the world and driver of the per-tick protocol.
//!
//! One Director is live at a time; constructing a new one (or calling
//! [`Director::reset`]) discards every entity and all scheduled state of
//! the previous world. The host calls [`Director::tick`] once per frame —
//! the core never sleeps or reads a wall clock, so the same tick sequence
//! always replays to the same world state.
//!
//! Tick order, fixed:
//! 1. drain queued input into the per-tick frame
//! 2. first tick only: `starting` handlers, each exactly once
//! 3. `typing` handlers, per held key in key order, registration order within
//! 4. `clicking` handlers, once per press transition, hit-tested
//! 5. `updating` handlers
//! 6. animation scheduler
//! 7. `watching` predicates, edge-triggered
//! 8. apply deferred removals, advance the frame clock
//!
//! A handler error propagates out of `tick` and halts the loop; a stop
//! request lets the current tick complete and blocks further ticks.

use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::{Entity, World};
use log::{debug, info};
use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::math::Vec2;
use crate::resources::frameclock::FrameClock;
use crate::resources::handlers::{self, Handlers};
use crate::resources::input::{InputFeed, InputFrame, Key, input_channel};
use crate::resources::loopcontrol::{LoopControl, loop_stopped};
use crate::resources::stage::Stage;
use crate::resources::stageconfig::StageConfig;
use crate::systems::animation::advance_animations;
use crate::systems::collision::hit_test;
use crate::systems::input::drain_input;
use crate::systems::time::advance_frame_clock;

pub struct Director {
    world: World,
    feed: InputFeed,
}

impl Director {
    /// Fresh world with default configuration at the given size.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let mut config = StageConfig::new();
        config.width = width;
        config.height = height;
        Self::with_config(config)
    }

    /// Fresh world from an explicit configuration. Dimensions and frame
    /// rate are validated here; nothing is constructed on failure.
    pub fn with_config(config: StageConfig) -> Result<Self> {
        let mut stage = Stage::new(config.width, config.height)?;
        stage.background = config.background;
        let clock = FrameClock::new(config.fps)?;

        let (feed, bridge) = input_channel();
        let mut world = World::new();
        world.insert_resource(stage);
        world.insert_resource(clock);
        world.insert_resource(InputFrame::default());
        world.insert_resource(bridge);
        world.init_resource::<Handlers>();
        world.init_resource::<LoopControl>();
        world.insert_resource(config.clone());

        info!(
            "stage ready: {}x{} at {} fps",
            config.width, config.height, config.fps
        );
        Ok(Self { world, feed })
    }

    /// Replace the world wholesale, discarding all entities, handlers, and
    /// scheduled state. Previously-handed-out input feeds go quiet.
    pub fn reset(&mut self, config: StageConfig) -> Result<()> {
        *self = Self::with_config(config)?;
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Cloneable handle for the host input source.
    pub fn input_feed(&self) -> InputFeed {
        self.feed.clone()
    }

    /// Completed ticks so far.
    pub fn frame(&self) -> u64 {
        self.world.resource::<FrameClock>().frame
    }

    pub fn running(&self) -> bool {
        !loop_stopped(&self.world)
    }

    /// Run one tick. Returns `Ok(false)` once the loop has been stopped
    /// (the stopping tick itself completes first). Handler errors
    /// propagate unmodified.
    pub fn tick(&mut self) -> Result<bool> {
        if loop_stopped(&self.world) {
            return Ok(false);
        }

        drain_input(&mut self.world);
        self.dispatch_starting()?;
        self.dispatch_typing()?;
        self.dispatch_clicking()?;
        self.dispatch_updating()?;
        advance_animations(&mut self.world);
        self.dispatch_watching()?;
        apply_removals(&mut self.world);
        advance_frame_clock(&mut self.world);

        Ok(!loop_stopped(&self.world))
    }

    /// Tick up to `frames` times, stopping early if the loop is stopped.
    /// Returns the number of ticks actually run.
    pub fn run_frames(&mut self, frames: u64) -> Result<u64> {
        let mut ran = 0;
        for _ in 0..frames {
            if !self.running() {
                break;
            }
            self.tick()?;
            ran += 1;
        }
        Ok(ran)
    }

    // ----- registration passthroughs -----

    pub fn on_starting(
        &mut self,
        f: impl FnMut(&mut World) -> Result<()> + Send + Sync + 'static,
    ) {
        handlers::on_starting(&mut self.world, f);
    }

    pub fn on_updating(
        &mut self,
        f: impl FnMut(&mut World, f32) -> Result<()> + Send + Sync + 'static,
    ) {
        handlers::on_updating(&mut self.world, f);
    }

    pub fn on_typing(
        &mut self,
        f: impl FnMut(&mut World, Key, f32) -> Result<()> + Send + Sync + 'static,
    ) {
        handlers::on_typing(&mut self.world, f);
    }

    pub fn on_clicking(
        &mut self,
        f: impl FnMut(&mut World, Vec2) -> Result<()> + Send + Sync + 'static,
    ) {
        handlers::on_clicking(&mut self.world, f);
    }

    pub fn on_clicking_entity(
        &mut self,
        target: Entity,
        f: impl FnMut(&mut World, Vec2) -> Result<()> + Send + Sync + 'static,
    ) {
        handlers::on_clicking_entity(&mut self.world, target, f);
    }

    pub fn when(
        &mut self,
        predicate: impl FnMut(&World) -> bool + Send + Sync + 'static,
        action: impl FnMut(&mut World) -> Result<()> + Send + Sync + 'static,
    ) {
        handlers::when(&mut self.world, predicate, action);
    }

    pub fn when_entity(
        &mut self,
        target: Entity,
        predicate: impl FnMut(&World) -> bool + Send + Sync + 'static,
        action: impl FnMut(&mut World) -> Result<()> + Send + Sync + 'static,
    ) {
        handlers::when_entity(&mut self.world, target, predicate, action);
    }

    // ----- dispatch steps -----

    fn dispatch_starting(&mut self) -> Result<()> {
        if self.world.resource::<Handlers>().started {
            return Ok(());
        }
        self.world.resource_mut::<Handlers>().started = true;

        let mut list = std::mem::take(&mut self.world.resource_mut::<Handlers>().starting);
        let mut result = Ok(());
        for f in list.iter_mut() {
            result = f(&mut self.world);
            if result.is_err() {
                break;
            }
        }
        self.world.resource_mut::<Handlers>().merge_starting(list);
        result
    }

    fn dispatch_typing(&mut self) -> Result<()> {
        let keys: Vec<Key> = self.world.resource::<InputFrame>().held_keys().collect();
        if keys.is_empty() {
            return Ok(());
        }
        let delta = self.world.resource::<FrameClock>().delta;

        let mut list = std::mem::take(&mut self.world.resource_mut::<Handlers>().typing);
        let mut result = Ok(());
        'outer: for key in keys {
            for f in list.iter_mut() {
                result = f(&mut self.world, key, delta);
                if result.is_err() {
                    break 'outer;
                }
            }
        }
        self.world.resource_mut::<Handlers>().merge_typing(list);
        result
    }

    fn dispatch_clicking(&mut self) -> Result<()> {
        let clicks: Vec<Vec2> = self.world.resource::<InputFrame>().clicks().to_vec();
        if clicks.is_empty() {
            return Ok(());
        }

        let mut list = std::mem::take(&mut self.world.resource_mut::<Handlers>().clicking);
        let mut result = Ok(());
        'outer: for click in clicks {
            for handler in list.iter_mut() {
                let fires = match handler.target {
                    None => true,
                    Some(target) => hit_test(&self.world, target, click),
                };
                if fires {
                    result = (handler.func)(&mut self.world, click);
                    if result.is_err() {
                        break 'outer;
                    }
                }
            }
        }
        self.world.resource_mut::<Handlers>().merge_clicking(list);
        result
    }

    fn dispatch_updating(&mut self) -> Result<()> {
        let delta = self.world.resource::<FrameClock>().delta;

        let mut list = std::mem::take(&mut self.world.resource_mut::<Handlers>().updating);
        let mut result = Ok(());
        for f in list.iter_mut() {
            result = f(&mut self.world, delta);
            if result.is_err() {
                break;
            }
        }
        self.world.resource_mut::<Handlers>().merge_updating(list);
        result
    }

    fn dispatch_watching(&mut self) -> Result<()> {
        let mut list = std::mem::take(&mut self.world.resource_mut::<Handlers>().watching);
        let mut result = Ok(());
        for watcher in list.iter_mut() {
            if let Some(target) = watcher.target {
                let gone = self.world.get_entity(target).is_err()
                    || self.world.resource::<Stage>().is_doomed(target);
                if gone {
                    continue;
                }
            }
            let now = (watcher.predicate)(&self.world);
            let fire = now && !watcher.was_true;
            watcher.was_true = now;
            if fire {
                result = (watcher.action)(&mut self.world);
                if result.is_err() {
                    break;
                }
            }
        }
        self.world.resource_mut::<Handlers>().merge_watching(list);
        result
    }
}

/// Despawn everything marked this tick: descendants are collected first so
/// group members leave the roster and lose their scoped handlers along
/// with their group.
fn apply_removals(world: &mut World) {
    let doomed = world.resource_mut::<Stage>().take_doomed();
    if doomed.is_empty() {
        return;
    }

    let mut gone: FxHashSet<Entity> = FxHashSet::default();
    let mut queue: Vec<Entity> = doomed.iter().copied().collect();
    while let Some(entity) = queue.pop() {
        if !gone.insert(entity) {
            continue;
        }
        if let Some(children) = world.get::<Children>(entity) {
            for child in children.iter() {
                queue.push(*child);
            }
        }
    }

    world.resource_mut::<Handlers>().purge_entities(&gone);
    world.resource_mut::<Stage>().purge(&gone);
    for &entity in &gone {
        if world.get_entity(entity).is_ok() {
            world.despawn(entity);
        }
    }
    debug!("removed {} entities at end of tick", gone.len());
}
