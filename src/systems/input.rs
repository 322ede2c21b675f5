//! Input drain: first step of every tick.

use bevy_ecs::prelude::World;

use crate::resources::input::{InputBridge, InputEvent, InputFrame};

/// Pull every event queued by the host since the last tick into the
/// per-tick [`InputFrame`]. Events are applied in arrival order, so a
/// press and release arriving between two ticks are both observed.
pub fn drain_input(world: &mut World) {
    let events: Vec<InputEvent> = world.resource::<InputBridge>().rx.try_iter().collect();
    let mut frame = world.resource_mut::<InputFrame>();
    frame.begin_tick();
    for event in events {
        frame.apply(event);
    }
}
