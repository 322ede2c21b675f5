use bevy_ecs::prelude::Component;

/// Whether the entity is drawn and participates in overlap tests.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visibility(pub bool);

impl Default for Visibility {
    fn default() -> Self {
        Visibility(true)
    }
}
