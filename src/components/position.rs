use bevy_ecs::prelude::Component;

use crate::math::Vec2;

/// Stage-space position of an entity's anchor point, in pixels.
///
/// Origin is the top-left corner of the stage; y grows downward. For a
/// group member this is the local offset from the group origin.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set(&mut self, v: Vec2) {
        self.x = v.x;
        self.y = v.y;
    }
}
