use bevy_ecs::prelude::Component;

/// Base drawable size in pixels, before scale is applied.
///
/// Effective bounds are `width * scale.x` by `height * scale.y`; with
/// non-negative scale factors the result is always non-negative.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
