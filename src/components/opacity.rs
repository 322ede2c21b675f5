use bevy_ecs::prelude::Component;

/// Alpha in 0.0 (transparent) ..= 1.0 (opaque). Invariant enforced by the
/// checked setter in [`crate::motion`].
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Opacity(pub f32);

impl Default for Opacity {
    fn default() -> Self {
        Opacity(1.0)
    }
}
