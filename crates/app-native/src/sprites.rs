//! Retained copy of the scene for drawing.
//!
//! Fed only through [`Presentation`] calls, so what ends up on screen is
//! exactly what the core asked for.

use app_core::{NodeId, Presentation, PotionKind, Scene, CAULDRON_FRAMES};
use fnv::FnvHashMap;
use glam::{Vec2, Vec4};

use crate::render::{Quad, Shape};

#[derive(Clone, Debug)]
struct MirrorSprite {
    position: Vec2,
    size: Vec2,
    layer: i32,
    frame: &'static str,
}

pub struct SpriteMirror {
    sprites: FnvHashMap<NodeId, MirrorSprite>,
    order: Vec<NodeId>,
    palette: FnvHashMap<&'static str, Vec4>,
}

impl SpriteMirror {
    /// Sizes are fixed for the life of the scene, so they are copied once;
    /// everything else arrives through the presentation calls.
    pub fn for_scene(scene: &Scene) -> Self {
        let mut sprites = FnvHashMap::default();
        for node in scene.draw_list() {
            if let Some(s) = scene.sprite(node) {
                sprites.insert(
                    node,
                    MirrorSprite {
                        position: s.position,
                        size: s.size,
                        layer: s.layer,
                        frame: s.frame,
                    },
                );
            }
        }
        Self {
            sprites,
            order: Vec::new(),
            palette: build_palette(),
        }
    }

    fn tint(&self, frame: &str) -> Vec4 {
        self.palette.get(frame).copied().unwrap_or(Vec4::ONE)
    }

    /// Back to front: ascending layer, ties by promotion order.
    pub fn draw_order(&self) -> Vec<NodeId> {
        let mut list = self.order.clone();
        list.sort_by_key(|n| self.sprites.get(n).map_or(i32::MIN, |s| s.layer));
        list
    }

    pub fn quads(&self, out: &mut Vec<Quad>) {
        for node in self.draw_order() {
            let Some(s) = self.sprites.get(&node) else {
                continue;
            };
            let color = self.tint(s.frame);
            out.push(Quad::new(s.position, s.size, color, Shape::Rect));
            if let Some(level) = spill_level(s.frame) {
                // droplets falling from the neck while pouring
                let drop = s.position + Vec2::new(0.0, s.size.y * (0.4 + 0.15 * level as f32));
                let r = 6.0 + 2.0 * level as f32;
                out.push(Quad::new(drop, Vec2::splat(r * 2.0), color, Shape::Circle));
            }
        }
    }
}

impl Presentation for SpriteMirror {
    fn place(&mut self, node: NodeId, position: Vec2) {
        if let Some(s) = self.sprites.get_mut(&node) {
            s.position = position;
        }
    }

    fn set_layer(&mut self, node: NodeId, layer: i32) {
        if let Some(s) = self.sprites.get_mut(&node) {
            s.layer = layer;
        }
    }

    fn bring_to_top(&mut self, node: NodeId) {
        self.order.retain(|n| *n != node);
        self.order.push(node);
    }

    fn show_frame(&mut self, node: NodeId, frame: &'static str) {
        if let Some(s) = self.sprites.get_mut(&node) {
            s.frame = frame;
        }
    }
}

fn spill_level(frame: &str) -> Option<u32> {
    let (_, n) = frame.rsplit_once("_spill")?;
    n.parse().ok()
}

fn base_color(kind: PotionKind) -> Vec4 {
    match kind {
        PotionKind::Pink => Vec4::new(0.95, 0.45, 0.75, 1.0),
        PotionKind::Blue => Vec4::new(0.35, 0.55, 0.95, 1.0),
        PotionKind::Green => Vec4::new(0.40, 0.85, 0.45, 1.0),
    }
}

/// Stand-in artwork: each frame name maps to a tint. Bottles fade as they
/// empty, the cauldron glows brighter as it bubbles.
fn build_palette() -> FnvHashMap<&'static str, Vec4> {
    let mut palette = FnvHashMap::default();
    for kind in [PotionKind::Pink, PotionKind::Blue, PotionKind::Green] {
        let base = base_color(kind);
        let frames = kind.frames();
        palette.insert(frames.idle, base);
        let n = frames.steps.len().max(1) as f32;
        for (i, step) in frames.steps.iter().enumerate() {
            let fade = 1.0 - 0.5 * (i as f32 / n);
            palette
                .entry(*step)
                .or_insert(base.truncate().extend(0.0) * fade + Vec4::W);
        }
    }

    let pot = Vec4::new(0.22, 0.20, 0.26, 1.0);
    let brew = Vec4::new(0.45, 0.95, 0.55, 1.0);
    palette.insert(CAULDRON_FRAMES.idle, pot);
    let n = CAULDRON_FRAMES.steps.len().max(1) as f32;
    for (i, step) in CAULDRON_FRAMES.steps.iter().enumerate() {
        let t = (i + 1) as f32 / n;
        palette.insert(*step, pot.lerp(brew, t * 0.8));
    }
    palette
}
