//! Scene model: the draggable potions, the cauldron they are poured into and
//! the draw order the presentation should honour.
//!
//! The model is authoritative. Every mutation goes through a [`Scene`] method
//! that also forwards the change to a [`Presentation`] sink, so an external
//! scene graph can mirror it without ever feeding back into the core.

use crate::constants::*;
use crate::error::SceneError;
use crate::geometry::Rect;
use crate::reaction::{AnimationPhase, FrameSequence};
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// Anything the presentation layer draws for us.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    Object(ObjectId),
    Target,
}

/// Draw commands the core issues. Implemented by whatever renders the scene.
pub trait Presentation {
    fn place(&mut self, node: NodeId, position: Vec2);
    fn set_layer(&mut self, node: NodeId, layer: i32);
    /// Move `node` after every other node sharing its layer.
    fn bring_to_top(&mut self, node: NodeId);
    fn show_frame(&mut self, node: NodeId, frame: &'static str);
}

/// Potion category. Selects which reaction frames an object plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PotionKind {
    Pink,
    Blue,
    Green,
}

const PINK_FRAMES: FrameSequence = FrameSequence {
    idle: "pink_standing",
    steps: &[
        "pink_standing",
        "pink_tip1",
        "pink_tip2",
        "pink_tip3",
        "pink_spill1",
        "pink_spill2",
        "pink_spill3",
        "pink_spill4",
    ],
};

const BLUE_FRAMES: FrameSequence = FrameSequence {
    idle: "blue_standing",
    steps: &[
        "blue_standing",
        "blue_tip1",
        "blue_tip2",
        "blue_tip3",
        "blue_spill1",
        "blue_spill2",
        "blue_spill3",
        "blue_spill4",
    ],
};

const GREEN_FRAMES: FrameSequence = FrameSequence {
    idle: "green_standing",
    steps: &[
        "green_standing",
        "green_tip1",
        "green_tip2",
        "green_tip3",
        "green_spill1",
        "green_spill2",
        "green_spill3",
        "green_spill4",
    ],
};

pub const CAULDRON_FRAMES: FrameSequence = FrameSequence {
    idle: "cauldron1",
    steps: &[
        "cauldron2",
        "cauldron3",
        "cauldron4",
        "cauldron5",
        "cauldron6",
        "cauldron7",
    ],
};

impl PotionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }

    pub fn frames(&self) -> FrameSequence {
        match self {
            Self::Pink => PINK_FRAMES,
            Self::Blue => BLUE_FRAMES,
            Self::Green => GREEN_FRAMES,
        }
    }
}

/// Drawable state shared by objects and the target.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub position: Vec2,
    pub size: Vec2,
    pub layer: i32,
    pub frame: &'static str,
}

impl Sprite {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }
}

#[derive(Clone, Debug)]
pub struct DraggableObject {
    pub id: ObjectId,
    pub kind: PotionKind,
    pub home: Vec2,
    pub base_layer: i32,
    pub sprite: Sprite,
    pub animation: AnimationPhase,
}

impl DraggableObject {
    pub fn new(id: ObjectId, kind: PotionKind, home: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            home,
            base_layer: OBJECT_LAYER,
            sprite: Sprite {
                position: home,
                size,
                layer: OBJECT_LAYER,
                frame: kind.frames().idle,
            },
            animation: AnimationPhase::Idle,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.sprite.bounds()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }
}

#[derive(Clone, Debug)]
pub struct DropTarget {
    pub base_layer: i32,
    pub sprite: Sprite,
    pub frames: FrameSequence,
    pub animation: AnimationPhase,
}

impl DropTarget {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            base_layer: TARGET_LAYER,
            sprite: Sprite {
                position,
                size,
                layer: TARGET_LAYER,
                frame: CAULDRON_FRAMES.idle,
            },
            frames: CAULDRON_FRAMES,
            animation: AnimationPhase::Idle,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.sprite.bounds()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }
}

pub struct Scene {
    objects: Vec<DraggableObject>,
    target: DropTarget,
    /// Insertion/promotion order; ties between equal layers resolve to the
    /// later entry.
    draw_order: Vec<NodeId>,
}

impl Scene {
    pub fn new(objects: Vec<DraggableObject>, target: DropTarget) -> Result<Self, SceneError> {
        if objects.is_empty() {
            return Err(SceneError::EmptyCatalog);
        }
        for (i, obj) in objects.iter().enumerate() {
            if objects[..i].iter().any(|o| o.id == obj.id) {
                return Err(SceneError::DuplicateObject(obj.id.0));
            }
            if obj.sprite.size.x <= 0.0 || obj.sprite.size.y <= 0.0 {
                return Err(SceneError::InvalidSize(format!("object {}", obj.id.0)));
            }
        }
        if target.sprite.size.x <= 0.0 || target.sprite.size.y <= 0.0 {
            return Err(SceneError::InvalidSize("target".into()));
        }

        let mut draw_order = Vec::with_capacity(objects.len() + 1);
        draw_order.push(NodeId::Target);
        draw_order.extend(objects.iter().map(|o| NodeId::Object(o.id)));
        Ok(Self {
            objects,
            target,
            draw_order,
        })
    }

    /// Cauldron in the middle of the table with three bottles around it.
    pub fn potion_table() -> Result<Self, SceneError> {
        let table_y = TABLE_Y_FRAC * DISPLAY_HEIGHT;
        let target = DropTarget::new(
            Vec2::new(0.5 * DISPLAY_WIDTH, table_y + 10.0),
            Vec2::from(CAULDRON_SIZE),
        );
        let kinds = [PotionKind::Pink, PotionKind::Blue, PotionKind::Green];
        let objects = kinds
            .iter()
            .zip(BOTTLE_HOME_X_FRACS)
            .enumerate()
            .map(|(i, (kind, x_frac))| {
                DraggableObject::new(
                    ObjectId(i),
                    *kind,
                    Vec2::new(x_frac * DISPLAY_WIDTH, table_y - 10.0),
                    Vec2::from(BOTTLE_SIZE),
                )
            })
            .collect();
        Self::new(objects, target)
    }

    pub fn objects(&self) -> &[DraggableObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&DraggableObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut DraggableObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn target(&self) -> &DropTarget {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut DropTarget {
        &mut self.target
    }

    pub fn sprite(&self, node: NodeId) -> Option<&Sprite> {
        match node {
            NodeId::Object(id) => self.object(id).map(|o| &o.sprite),
            NodeId::Target => Some(&self.target.sprite),
        }
    }

    fn sprite_mut(&mut self, node: NodeId) -> Option<&mut Sprite> {
        match node {
            NodeId::Object(id) => self.object_mut(id).map(|o| &mut o.sprite),
            NodeId::Target => Some(&mut self.target.sprite),
        }
    }

    /// Bounding box query; boxes are derived from position and size.
    pub fn bounds(&self, node: NodeId) -> Option<Rect> {
        self.sprite(node).map(Sprite::bounds)
    }

    /// First non-animating object, in catalog order, whose box contains `p`.
    pub fn hit_test(&self, p: Vec2) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|o| !o.is_animating() && o.bounds().contains(p))
            .map(|o| o.id)
    }

    pub fn place<P: Presentation + ?Sized>(&mut self, node: NodeId, pos: Vec2, out: &mut P) {
        if let Some(s) = self.sprite_mut(node) {
            s.position = pos;
            out.place(node, pos);
        }
    }

    pub fn set_layer<P: Presentation + ?Sized>(&mut self, node: NodeId, layer: i32, out: &mut P) {
        if let Some(s) = self.sprite_mut(node) {
            s.layer = layer;
            out.set_layer(node, layer);
        }
    }

    pub fn bring_to_top<P: Presentation + ?Sized>(&mut self, node: NodeId, out: &mut P) {
        if let Some(i) = self.draw_order.iter().position(|n| *n == node) {
            let n = self.draw_order.remove(i);
            self.draw_order.push(n);
            out.bring_to_top(node);
        }
    }

    pub fn show_frame<P: Presentation + ?Sized>(
        &mut self,
        node: NodeId,
        frame: &'static str,
        out: &mut P,
    ) {
        if let Some(s) = self.sprite_mut(node) {
            s.frame = frame;
            out.show_frame(node, frame);
        }
    }

    /// Highest layer currently in use by any node.
    pub fn top_layer(&self) -> i32 {
        self.objects
            .iter()
            .map(|o| o.sprite.layer)
            .fold(self.target.sprite.layer, i32::max)
    }

    /// Back to front: ascending layer, then draw order.
    pub fn draw_list(&self) -> SmallVec<[NodeId; 8]> {
        let mut list: SmallVec<[NodeId; 8]> = self.draw_order.iter().copied().collect();
        list.sort_by_key(|n| self.sprite(*n).map_or(i32::MIN, |s| s.layer));
        list
    }

    /// Push the whole model to a freshly created presentation.
    pub fn sync<P: Presentation + ?Sized>(&self, out: &mut P) {
        for node in self.draw_list() {
            if let Some(s) = self.sprite(node) {
                out.place(node, s.position);
                out.set_layer(node, s.layer);
                out.show_frame(node, s.frame);
                out.bring_to_top(node);
            }
        }
    }
}
