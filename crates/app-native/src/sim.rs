//! Mouse-driven stand-in for a hand landmark detector.
//!
//! The pointer is the index fingertip; holding the left button (or Space)
//! closes the thumb onto it. Frames come out in the detector's raw form:
//! normalized, camera-mirrored, 21 points.

use app_core::{Landmark, DISPLAY_HEIGHT, DISPLAY_WIDTH, LANDMARK_COUNT};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HAND_SIZE: f32 = 0.15; // wrist -> middle MCP, normalized
const PINCHED_RATIO: f32 = 0.2;
const OPEN_RATIO: f32 = 0.8;
const JITTER: f32 = 0.004; // per-axis, normalized

pub struct SimulatedHand {
    pointer: Option<Vec2>, // display coordinates
    button: bool,
    key: bool,
    jitter: bool,
    rng: StdRng,
}

impl SimulatedHand {
    pub fn new(seed: u64) -> Self {
        Self {
            pointer: None,
            button: false,
            key: false,
            jitter: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn move_to(&mut self, display_pos: Vec2) {
        self.pointer = Some(display_pos);
    }

    /// Pointer left the window: the hand is out of frame.
    pub fn leave(&mut self) {
        self.pointer = None;
    }

    pub fn set_button(&mut self, down: bool) {
        self.button = down;
    }

    pub fn set_key(&mut self, down: bool) {
        self.key = down;
    }

    pub fn toggle_jitter(&mut self) -> bool {
        self.jitter = !self.jitter;
        self.jitter
    }

    pub fn pinched(&self) -> bool {
        self.button || self.key
    }

    /// One detector frame, or `None` when no hand is in view.
    pub fn sample(&mut self) -> Option<Vec<[f32; 2]>> {
        let p = self.pointer?;
        // undo the display mirroring so the core maps it back onto `p`
        let tip = Vec2::new(1.0 - p.x / DISPLAY_WIDTH, p.y / DISPLAY_HEIGHT);
        let ratio = if self.pinched() {
            PINCHED_RATIO
        } else {
            OPEN_RATIO
        };

        let wrist = tip + Vec2::new(0.0, 2.2 * HAND_SIZE);
        let mcp = wrist - Vec2::new(0.0, HAND_SIZE);
        let mut pts = vec![mcp; LANDMARK_COUNT];
        pts[Landmark::Wrist.index()] = wrist;
        pts[Landmark::MiddleMcp.index()] = mcp;
        pts[Landmark::IndexTip.index()] = tip;
        pts[Landmark::ThumbTip.index()] = tip + Vec2::new(ratio * HAND_SIZE, 0.0);

        if self.jitter {
            for p in pts.iter_mut() {
                *p += Vec2::new(
                    self.rng.gen_range(-JITTER..=JITTER),
                    self.rng.gen_range(-JITTER..=JITTER),
                );
            }
        }
        Some(pts.into_iter().map(|p| p.to_array()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::HandFrame;

    #[test]
    fn no_pointer_means_no_hand() {
        let mut hand = SimulatedHand::new(1);
        assert!(hand.sample().is_none());
        hand.move_to(Vec2::new(10.0, 10.0));
        assert!(hand.sample().is_some());
        hand.leave();
        assert!(hand.sample().is_none());
    }

    #[test]
    fn frames_parse_with_expected_ratios() {
        let mut hand = SimulatedHand::new(1);
        hand.move_to(Vec2::new(200.0, 300.0));
        let open = HandFrame::from_points(&hand.sample().unwrap()).unwrap();
        assert!((open.pinch_ratio() - OPEN_RATIO).abs() < 1e-3);

        hand.set_key(true);
        let shut = HandFrame::from_points(&hand.sample().unwrap()).unwrap();
        assert!((shut.pinch_ratio() - PINCHED_RATIO).abs() < 1e-3);
        hand.set_key(false);
        hand.set_button(true);
        assert!(hand.pinched());
    }

    #[test]
    fn jitter_stays_within_thresholds() {
        let mut hand = SimulatedHand::new(3);
        hand.move_to(Vec2::new(400.0, 600.0));
        assert!(hand.toggle_jitter());
        for _ in 0..200 {
            let f = HandFrame::from_points(&hand.sample().unwrap()).unwrap();
            assert!(f.pinch_ratio() > app_core::PINCH_OFF_RATIO);
        }
        hand.set_button(true);
        for _ in 0..200 {
            let f = HandFrame::from_points(&hand.sample().unwrap()).unwrap();
            assert!(f.pinch_ratio() < app_core::PINCH_ON_RATIO);
        }
    }
}
