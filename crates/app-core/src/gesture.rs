//! Gesture stabilization: noisy landmark frames in, a smoothed cursor and a
//! debounced pinch flag out.
//!
//! The cursor follows the mirrored index fingertip through a fixed-factor
//! exponential filter. Pinch uses a hand-size normalized ratio with two
//! thresholds (ON below, OFF above) and per-direction streak counts, so the
//! flag never flips on a single noisy sample.

use crate::constants::*;
use crate::geometry::clamp_to_display;
use crate::hand::{HandFrame, Landmark};
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct GestureConfig {
    pub display: Vec2,
    pub smoothing: f32,
    pub pinch_on_ratio: f32,
    pub pinch_off_ratio: f32,
    pub pinch_on_frames: u32,
    pub pinch_off_frames: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            display: Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT),
            smoothing: SMOOTHING_ALPHA,
            pinch_on_ratio: PINCH_ON_RATIO,
            pinch_off_ratio: PINCH_OFF_RATIO,
            pinch_on_frames: PINCH_ON_FRAMES,
            pinch_off_frames: PINCH_OFF_FRAMES,
        }
    }
}

/// Debounced pinch transition reported by [`GesturePipeline::process`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinchEdge {
    Pressed,
    Released,
}

/// What the interaction layer reads each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSignal {
    pub cursor: Vec2,
    pub pinching: bool,
}

/// Stabilized hand state. Owned by the control loop, written only by
/// [`GesturePipeline`].
#[derive(Clone, Debug)]
pub struct GestureState {
    has_hand: bool,
    cursor: Vec2,
    pinching: bool,
    smooth: Vec2,
    on_streak: u32,
    off_streak: u32,
}

impl GestureState {
    /// Cursor and smoothing accumulator start at the display centre.
    pub fn new(display: Vec2) -> Self {
        let center = display * 0.5;
        Self {
            has_hand: false,
            cursor: center,
            pinching: false,
            smooth: center,
            on_streak: 0,
            off_streak: 0,
        }
    }

    pub fn has_hand(&self) -> bool {
        self.has_hand
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn pinching(&self) -> bool {
        self.pinching
    }

    pub fn on_streak(&self) -> u32 {
        self.on_streak
    }

    pub fn off_streak(&self) -> u32 {
        self.off_streak
    }

    pub fn signal(&self) -> GestureSignal {
        GestureSignal {
            cursor: self.cursor,
            pinching: self.pinching,
        }
    }

    fn lose_hand(&mut self) -> Option<PinchEdge> {
        let was_pinching = self.pinching;
        self.has_hand = false;
        self.pinching = false;
        self.on_streak = 0;
        self.off_streak = 0;
        was_pinching.then_some(PinchEdge::Released)
    }

    fn update_pinch(&mut self, ratio: f32, cfg: &GestureConfig) -> Option<PinchEdge> {
        if ratio < cfg.pinch_on_ratio {
            self.on_streak += 1;
            self.off_streak = 0;
        } else if ratio > cfg.pinch_off_ratio {
            self.off_streak += 1;
            self.on_streak = 0;
        } else {
            // dead band: keep the flag, drop both streaks
            self.on_streak = 0;
            self.off_streak = 0;
        }

        if !self.pinching && self.on_streak >= cfg.pinch_on_frames {
            self.pinching = true;
            self.on_streak = 0;
            return Some(PinchEdge::Pressed);
        }
        if self.pinching && self.off_streak >= cfg.pinch_off_frames {
            self.pinching = false;
            self.off_streak = 0;
            return Some(PinchEdge::Released);
        }
        None
    }
}

pub struct GesturePipeline {
    pub config: GestureConfig,
}

impl GesturePipeline {
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// Fresh state matching this pipeline's display.
    pub fn initial_state(&self) -> GestureState {
        GestureState::new(self.config.display)
    }

    /// Mirrored, scaled and clamped fingertip position for a frame.
    pub fn cursor_target(&self, frame: &HandFrame) -> Vec2 {
        let tip = frame.point(Landmark::IndexTip);
        let target = Vec2::new(
            (1.0 - tip.x) * self.config.display.x,
            tip.y * self.config.display.y,
        );
        clamp_to_display(target, self.config.display)
    }

    /// Advance `state` by one sampled frame (`None` = no hand).
    pub fn process(
        &self,
        state: &mut GestureState,
        frame: Option<&HandFrame>,
    ) -> Option<PinchEdge> {
        let Some(frame) = frame else {
            let edge = state.lose_hand();
            if edge.is_some() {
                log::debug!("[gesture] hand lost while pinching");
            }
            return edge;
        };
        state.has_hand = true;

        let target = self.cursor_target(frame);
        state.smooth += (target - state.smooth) * self.config.smoothing;
        state.cursor = clamp_to_display(state.smooth, self.config.display);

        state.update_pinch(frame.pinch_ratio(), &self.config)
    }

    /// Validate raw landmarks and process them. A malformed set counts as
    /// "no hand" for this frame only.
    pub fn process_raw(
        &self,
        state: &mut GestureState,
        raw: Option<&[[f32; 2]]>,
    ) -> Option<PinchEdge> {
        let frame = match raw.map(HandFrame::from_points) {
            Some(Ok(frame)) => Some(frame),
            Some(Err(e)) => {
                log::debug!("[gesture] dropping landmark frame: {e}");
                None
            }
            None => None,
        };
        self.process(state, frame.as_ref())
    }
}

impl Default for GesturePipeline {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
