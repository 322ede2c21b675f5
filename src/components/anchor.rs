use bevy_ecs::prelude::Component;

/// Which point of the bounding rectangle [`Position`](super::position::Position)
/// refers to. Set by the shape factories: rectangles and text anchor at the
/// top-left corner, circles and ellipses at the center.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    TopLeft,
    Center,
}
