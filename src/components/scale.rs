use bevy_ecs::prelude::Component;

/// Independent x/y scale factors. Invariant: never negative (enforced by
/// the checked setters in [`crate::motion`]).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Default for Scale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl Scale {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn uniform(factor: f32) -> Self {
        Self {
            x: factor,
            y: factor,
        }
    }
}
