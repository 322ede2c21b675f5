//! Small 2D math helpers shared by the scheduler, collision tests, and
//! placement resolution. Screen convention throughout: origin top-left,
//! y grows downward, rotation in degrees with clockwise positive.

use core::ops::{Add, AddAssign, Mul, Sub};

use serde::Serialize;

/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Linearly interpolate between two floats.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two vectors, component-wise.
#[inline]
pub fn lerp_v2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Unit vector for a travel direction given in degrees.
///
/// 0 points right, 90 points up on screen (negative y), matching the
/// counter-clockwise convention students learn on paper.
pub fn heading(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Rotate a vector by `degrees` around the origin.
///
/// In y-down screen space this turns clockwise for positive angles.
pub fn rotate(v: Vec2, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    Vec2 {
        x: v.x * cos - v.y * sin,
        y: v.x * sin + v.y * cos,
    }
}

/// Angle in degrees from `a` toward `b`, in the same convention as
/// [`heading`]: 0 = right, 90 = up on screen.
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let dx = b.x - a.x;
    let dy = a.y - b.y;
    dy.atan2(dx).to_degrees()
}
