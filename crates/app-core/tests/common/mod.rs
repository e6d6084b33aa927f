// Shared helpers for the app-core integration tests.
#![allow(dead_code)]

use app_core::{NodeId, Presentation, DISPLAY_HEIGHT, DISPLAY_WIDTH, LANDMARK_COUNT};
use glam::Vec2;

const WRIST: [f32; 2] = [0.5, 0.95];
const MIDDLE_MCP: [f32; 2] = [0.5, 0.75]; // hand size 0.2

/// 21 landmarks whose index tip maps (after mirroring) onto `display_pos`
/// and whose pinch ratio is `ratio`.
pub fn hand_at(display_pos: Vec2, ratio: f32) -> Vec<[f32; 2]> {
    let tip = [
        1.0 - display_pos.x / DISPLAY_WIDTH,
        display_pos.y / DISPLAY_HEIGHT,
    ];
    let mut pts = vec![WRIST; LANDMARK_COUNT];
    pts[9] = MIDDLE_MCP;
    pts[8] = tip;
    pts[4] = [tip[0] + ratio * 0.2, tip[1]];
    pts
}

/// Landmarks with a given pinch ratio and the fingertip at the display centre.
pub fn hand_with_ratio(ratio: f32) -> Vec<[f32; 2]> {
    hand_at(Vec2::new(DISPLAY_WIDTH * 0.5, DISPLAY_HEIGHT * 0.5), ratio)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Place(NodeId, Vec2),
    Layer(NodeId, i32),
    Top(NodeId),
    Frame(NodeId, &'static str),
}

/// Presentation double that records every draw command.
#[derive(Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn frames_for(&self, node: NodeId) -> Vec<&'static str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Frame(n, f) if *n == node => Some(*f),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Presentation for Recorder {
    fn place(&mut self, node: NodeId, position: Vec2) {
        self.calls.push(Call::Place(node, position));
    }

    fn set_layer(&mut self, node: NodeId, layer: i32) {
        self.calls.push(Call::Layer(node, layer));
    }

    fn bring_to_top(&mut self, node: NodeId) {
        self.calls.push(Call::Top(node));
    }

    fn show_frame(&mut self, node: NodeId, frame: &'static str) {
        self.calls.push(Call::Frame(node, frame));
    }
}
