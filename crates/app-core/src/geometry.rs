//! Axis-aligned rectangles in display space.

use glam::Vec2;

/// Axis-aligned bounding box. `min` is the top-left corner (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Edge-inclusive containment. Degenerate rectangles contain nothing.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        if self.width() <= 0.0 || self.height() <= 0.0 {
            return false;
        }
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Clamp a point into `[0, size.x] x [0, size.y]`.
#[inline]
pub fn clamp_to_display(p: Vec2, size: Vec2) -> Vec2 {
    p.clamp(Vec2::ZERO, size)
}
