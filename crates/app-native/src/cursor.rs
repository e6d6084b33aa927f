use app_core::{
    Rect, CURSOR_DOT_FOLLOW, CURSOR_DOT_RADIUS, CURSOR_RING_FOLLOW, CURSOR_RING_RADIUS,
};
use glam::{Vec2, Vec4};

use crate::render::{Quad, Shape};

const DOT_OPEN: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.9);
const DOT_PINCH: Vec4 = Vec4::new(1.0, 0.85, 0.3, 1.0);
const RING_OPEN: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.5);
const RING_PINCH: Vec4 = Vec4::new(1.0, 0.85, 0.3, 0.8);
const HOVER: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.18);

/// Purely visual follower of the smoothed cursor: a dot that keeps up and a
/// lazier ring around it.
pub struct CursorVisual {
    dot: Vec2,
    ring: Vec2,
}

impl CursorVisual {
    pub fn new(at: Vec2) -> Self {
        Self { dot: at, ring: at }
    }

    pub fn follow(&mut self, cursor: Vec2) {
        self.dot += (cursor - self.dot) * CURSOR_DOT_FOLLOW;
        self.ring += (cursor - self.ring) * CURSOR_RING_FOLLOW;
    }

    pub fn quads(&self, pinching: bool, visible: bool, out: &mut Vec<Quad>) {
        if !visible {
            return;
        }
        let (dot, ring) = if pinching {
            (DOT_PINCH, RING_PINCH)
        } else {
            (DOT_OPEN, RING_OPEN)
        };
        let ring_size = Vec2::splat(CURSOR_RING_RADIUS * 2.0);
        out.push(Quad::new(self.ring, ring_size, ring, Shape::Ring));
        let dot_size = Vec2::splat(CURSOR_DOT_RADIUS * 2.0);
        out.push(Quad::new(self.dot, dot_size, dot, Shape::Circle));
    }
}

/// Soft highlight over the object under the cursor.
pub fn hover_quad(bounds: Rect) -> Quad {
    let pad = Vec2::splat(8.0);
    Quad::new(
        bounds.center(),
        Vec2::new(bounds.width(), bounds.height()) + pad,
        HOVER,
        Shape::Rect,
    )
}
