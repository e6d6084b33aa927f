use app_core::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use glam::{Mat4, Vec2};

/// Fits the portrait display into the window, centred, preserving aspect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub offset: Vec2, // window pixels
    pub scale: f32,   // window pixels per display unit
}

impl Letterbox {
    pub fn new(width: u32, height: u32) -> Self {
        let window = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let display = Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT);
        let scale = (window.x / display.x).min(window.y / display.y);
        Self {
            offset: (window - display * scale) * 0.5,
            scale,
        }
    }

    /// Window pixel position to display coordinates. Not clamped.
    pub fn to_display(&self, px: Vec2) -> Vec2 {
        (px - self.offset) / self.scale
    }

    /// Viewport rectangle `(x, y, w, h)` in window pixels.
    pub fn viewport(&self) -> [f32; 4] {
        [
            self.offset.x,
            self.offset.y,
            DISPLAY_WIDTH * self.scale,
            DISPLAY_HEIGHT * self.scale,
        ]
    }
}

/// Display space (origin top-left, y down) to clip space.
pub fn display_projection() -> Mat4 {
    Mat4::orthographic_rh(0.0, DISPLAY_WIDTH, DISPLAY_HEIGHT, 0.0, -1.0, 1.0)
}
