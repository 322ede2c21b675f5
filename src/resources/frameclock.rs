//! Fixed-cadence frame clock.
//!
//! The core never reads a wall clock; the host drives ticks and every tick
//! advances time by exactly `interval` seconds. Determinism for replay
//! comes from this: the same tick count always produces the same elapsed
//! time.

use bevy_ecs::prelude::Resource;

use crate::error::{Error, Result};

#[derive(Resource, Clone, Copy, Debug)]
pub struct FrameClock {
    /// Completed ticks since the stage was created.
    pub frame: u64,
    /// Seconds per tick.
    pub interval: f32,
    /// `frame * interval`, maintained incrementally.
    pub elapsed: f32,
    /// Seconds advanced by the last tick. Always equals `interval` here;
    /// kept separate so handler code reads the same shape it would from a
    /// variable-rate clock.
    pub delta: f32,
}

impl FrameClock {
    pub fn new(fps: u32) -> Result<Self> {
        if fps == 0 {
            return Err(Error::InvalidFrameRate(fps));
        }
        let interval = 1.0 / fps as f32;
        Ok(Self {
            frame: 0,
            interval,
            elapsed: 0.0,
            delta: interval,
        })
    }
}
