//! Error type shared across the crate.
//!
//! Everything fails fast: configuration mistakes are rejected at the call
//! that would introduce them, and operations on entities that have left the
//! stage are surfaced as [`Error::NotStaged`] rather than silently ignored.

use bevy_ecs::entity::Entity;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid stage dimensions {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("scale factor must be non-negative, got {0}")]
    NegativeScale(f32),

    #[error("opacity must be within 0.0..=1.0, got {0}")]
    OpacityOutOfRange(f32),

    #[error("duration must be positive, got {0}")]
    NonPositiveDuration(f32),

    #[error("speed must be positive, got {0}")]
    NonPositiveSpeed(f32),

    #[error("frame rate must be positive, got {0}")]
    InvalidFrameRate(u32),

    #[error("entity {0} is not on the stage")]
    NotStaged(Entity),

    #[error("config: {0}")]
    Config(String),

    /// Failure raised from user callback code; propagates out of the tick
    /// and halts the loop.
    #[error("{0}")]
    Callback(String),
}
