//! The stage: dimensions, background, and the ordered entity roster.
//!
//! Roster order is insertion order and doubles as z-order for drawing and
//! as iteration order for the animation scheduler. It is never reordered.
//! Removal is deferred: `destroy` marks an entity doomed, and the Director
//! applies all removals at the end of the tick so handlers running in the
//! same tick neither skip nor double-process siblings.

use bevy_ecs::prelude::{Entity, Resource, World};
use log::debug;
use rustc_hash::FxHashSet;

use crate::components::shape::Color;
use crate::error::{Error, Result};

#[derive(Resource, Debug)]
pub struct Stage {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    roster: Vec<Entity>,
    doomed: FxHashSet<Entity>,
}

impl Stage {
    /// Create a stage. Non-positive or non-finite dimensions are rejected
    /// and no state changes.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            background: Color::WHITE,
            roster: Vec::new(),
            doomed: FxHashSet::default(),
        })
    }

    /// Append an entity; its z-order is the roster length at call time.
    pub fn insert(&mut self, entity: Entity) {
        self.roster.push(entity);
    }

    /// Entities in insertion order (z-order, scheduler order).
    pub fn order(&self) -> &[Entity] {
        &self.roster
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.roster.contains(&entity)
    }

    /// Mark an entity for removal at end of tick. The scheduler and the
    /// watcher pass skip doomed entities for the rest of the tick.
    pub fn doom(&mut self, entity: Entity) {
        self.doomed.insert(entity);
    }

    pub fn is_doomed(&self, entity: Entity) -> bool {
        self.doomed.contains(&entity)
    }

    pub(crate) fn doomed_set(&self) -> FxHashSet<Entity> {
        self.doomed.clone()
    }

    pub(crate) fn take_doomed(&mut self) -> FxHashSet<Entity> {
        std::mem::take(&mut self.doomed)
    }

    pub(crate) fn purge(&mut self, gone: &FxHashSet<Entity>) {
        self.roster.retain(|e| !gone.contains(e));
    }
}

/// Mark `entity` for removal at the end of the current tick.
///
/// Removal cancels the entity's animation tasks (they are owned by the
/// despawned entity), unregisters click handlers and watchers bound to it,
/// and despawns group members along with their group.
pub fn destroy(world: &mut World, entity: Entity) -> Result<()> {
    if world.get_entity(entity).is_err() {
        return Err(Error::NotStaged(entity));
    }
    let mut stage = world.resource_mut::<Stage>();
    if !stage.contains(entity) {
        return Err(Error::NotStaged(entity));
    }
    debug!("entity {entity} marked for removal");
    stage.doom(entity);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(matches!(
            Stage::new(0.0, 600.0),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Stage::new(800.0, -1.0),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Stage::new(f32::NAN, 600.0),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(Stage::new(800.0, 600.0).is_ok());
    }

    #[test]
    fn test_roster_keeps_insertion_order() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let c = world.spawn_empty().id();

        let mut stage = Stage::new(800.0, 600.0).unwrap();
        stage.insert(a);
        stage.insert(b);
        stage.insert(c);
        assert_eq!(stage.order(), &[a, b, c]);
        assert_eq!(stage.len(), 3);
    }

    #[test]
    fn test_doom_and_purge() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut stage = Stage::new(800.0, 600.0).unwrap();
        stage.insert(a);
        stage.insert(b);
        stage.doom(a);
        assert!(stage.is_doomed(a));
        assert!(!stage.is_doomed(b));
        // still in roster until the removal pass applies
        assert!(stage.contains(a));

        let gone = stage.take_doomed();
        stage.purge(&gone);
        assert_eq!(stage.order(), &[b]);
        assert!(!stage.is_doomed(a));
    }

    #[test]
    fn test_destroy_unknown_entity_is_an_error() {
        let mut world = World::new();
        world.insert_resource(Stage::new(800.0, 600.0).unwrap());
        let stray = world.spawn_empty().id();
        // alive in the ECS but never put on the stage
        assert!(matches!(
            destroy(&mut world, stray),
            Err(Error::NotStaged(_))
        ));
    }
}
