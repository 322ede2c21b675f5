//! Shape data handed to the external renderer.
//!
//! The core never rasterizes anything; [`Shape`] is pure data describing
//! what the entity looks like. Colors are numeric RGBA — name resolution
//! (`"red"` and friends) belongs to the host layer.

use bevy_ecs::prelude::Component;
use serde::Serialize;

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Geometry variant for the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ShapeKind {
    Rectangle,
    Circle {
        radius: f32,
    },
    Ellipse,
    /// Segment with endpoints relative to the anchor (the factory
    /// normalizes the anchor to the top-left corner of the segment's
    /// bounding box, so the offsets are non-negative).
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
    },
    Text {
        content: String,
        point_size: f32,
    },
}

/// What to draw for this entity. Entities without a `Shape` (groups) are
/// invisible containers.
#[derive(Component, Clone, Debug, PartialEq, Serialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: Color,
}

impl Shape {
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        Self { kind, color }
    }
}
