use bevy_ecs::prelude::Component;

/// Independent mirror flags for the renderer. Flipping does not move the
/// bounding rectangle.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}
