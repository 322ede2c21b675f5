use bevy_ecs::prelude::{Resource, World};

/// Loop-termination flag. A handler may request the loop to stop; the
/// current tick still completes, and no further ticks are scheduled.
#[derive(Resource, Debug, Default)]
pub struct LoopControl {
    pub stop_requested: bool,
}

/// Request loop termination from handler code.
pub fn stop_loop(world: &mut World) {
    world.resource_mut::<LoopControl>().stop_requested = true;
}

/// Whether loop termination has been requested.
pub fn loop_stopped(world: &World) -> bool {
    world.resource::<LoopControl>().stop_requested
}
