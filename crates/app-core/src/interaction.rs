//! Grab / drag / release state machine driven by the stabilized gesture
//! signal.
//!
//! At most one object is held. A grab needs an idle grip, an active pinch and
//! a hover candidate. A release fires only after the pinch has been off for
//! a short grace window, which swallows one-frame detector dropouts near the
//! release boundary.

use crate::constants::{DROP_SNAP_OFFSET_Y, HELD_LAYER, RELEASE_GRACE_FRAMES};
use crate::gesture::GestureSignal;
use crate::reaction::ReactionSequencer;
use crate::scene::{NodeId, ObjectId, Presentation, Scene};
use crate::scheduler::Scheduler;
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct InteractionConfig {
    pub release_grace_frames: u32,
    /// Offset from the target centre where a poured object is placed.
    pub drop_snap_offset: Vec2,
    /// Lowest layer a grabbed object is lifted to.
    pub held_layer: i32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            release_grace_frames: RELEASE_GRACE_FRAMES,
            drop_snap_offset: Vec2::new(0.0, -DROP_SNAP_OFFSET_Y),
            held_layer: HELD_LAYER,
        }
    }
}

/// The held reference plus its release grace counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Grip {
    #[default]
    Idle,
    Held { object: ObjectId, grace: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    Held,
    /// Held, but the pinch has dropped and the grace window is counting.
    ReleasePending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    Grabbed(ObjectId),
    Released { object: ObjectId, on_target: bool },
}

#[derive(Default)]
pub struct Interaction {
    pub config: InteractionConfig,
    grip: Grip,
    hovered: Option<ObjectId>,
}

impl Interaction {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            grip: Grip::Idle,
            hovered: None,
        }
    }

    pub fn grip(&self) -> Grip {
        self.grip
    }

    pub fn held(&self) -> Option<ObjectId> {
        match self.grip {
            Grip::Held { object, .. } => Some(object),
            Grip::Idle => None,
        }
    }

    /// Hover candidate from the latest update.
    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    pub fn phase(&self) -> InteractionPhase {
        match self.grip {
            Grip::Idle => InteractionPhase::Idle,
            Grip::Held { grace: 0, .. } => InteractionPhase::Held,
            Grip::Held { .. } => InteractionPhase::ReleasePending,
        }
    }

    /// One presentation frame: follow, hit test, grab, grace, release.
    pub fn update<S, P>(
        &mut self,
        signal: GestureSignal,
        scene: &mut Scene,
        reactions: &ReactionSequencer,
        timers: &mut S,
        out: &mut P,
    ) -> Option<InteractionEvent>
    where
        S: Scheduler + ?Sized,
        P: Presentation + ?Sized,
    {
        let cursor = signal.cursor;

        if let Grip::Held { object, .. } = self.grip {
            scene.place(NodeId::Object(object), cursor, out);
        }

        self.hovered = scene.hit_test(cursor);

        let mut event = None;
        if let (Grip::Idle, true, Some(object)) = (self.grip, signal.pinching, self.hovered) {
            self.grip = Grip::Held { object, grace: 0 };
            let node = NodeId::Object(object);
            // above everything, including a target raised by a running pour
            let layer = self.config.held_layer.max(scene.top_layer() + 1);
            scene.set_layer(node, layer, out);
            scene.bring_to_top(node, out);
            let kind = scene.object(object).map_or("?", |o| o.kind.as_str());
            log::info!("[grab] object {} ({kind})", object.0);
            event = Some(InteractionEvent::Grabbed(object));
        }

        let Grip::Held { object, grace } = &mut self.grip else {
            return event;
        };
        let object = *object;
        if signal.pinching {
            *grace = 0;
        } else {
            *grace += 1;
        }
        if *grace < self.config.release_grace_frames {
            return event;
        }

        let on_target = scene
            .bounds(NodeId::Target)
            .is_some_and(|b| b.contains(cursor));
        self.release(object, on_target, scene, reactions, timers, out);
        self.grip = Grip::Idle;
        Some(InteractionEvent::Released { object, on_target })
    }

    fn release<S, P>(
        &self,
        object: ObjectId,
        on_target: bool,
        scene: &mut Scene,
        reactions: &ReactionSequencer,
        timers: &mut S,
        out: &mut P,
    ) where
        S: Scheduler + ?Sized,
        P: Presentation + ?Sized,
    {
        let node = NodeId::Object(object);
        let Some((home, base_layer, layer)) = scene
            .object(object)
            .map(|o| (o.home, o.base_layer, o.sprite.layer))
        else {
            return;
        };

        if on_target {
            let snap = scene.target().sprite.position + self.config.drop_snap_offset;
            scene.place(node, snap, out);
            scene.set_layer(NodeId::Target, layer + 1, out);
            log::info!("[drop] object {} poured into target", object.0);
            reactions.play(scene, node, timers, out);
        } else {
            scene.place(node, home, out);
            scene.set_layer(node, base_layer, out);
            log::info!("[drop] object {} returned home", object.0);
        }
    }
}
