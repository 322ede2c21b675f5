//! Frame clock advancement, last step of every tick.

use bevy_ecs::prelude::World;

use crate::resources::frameclock::FrameClock;

/// Advance the clock by one frame.
///
/// `elapsed` is recomputed as `frame * interval` rather than accumulated,
/// so long runs do not drift away from the frame counter.
pub fn advance_frame_clock(world: &mut World) {
    let mut clock = world.resource_mut::<FrameClock>();
    clock.frame += 1;
    clock.delta = clock.interval;
    clock.elapsed = clock.frame as f32 * clock.interval;
}
