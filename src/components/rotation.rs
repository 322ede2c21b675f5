use bevy_ecs::prelude::Component;

/// Rotation angle in degrees. 0 is unrotated; positive turns clockwise on
/// screen. Not wrapped: a spinning entity accumulates past 360.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
}

impl Rotation {
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }
}
