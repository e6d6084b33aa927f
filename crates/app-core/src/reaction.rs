//! Timed frame sequences played after a successful drop.
//!
//! A pour runs in two chained parts: the potion tips and spills while the
//! cauldron sits above it, then the potion goes home and the cauldron
//! bubbles. Each part is an [`AnimationPhase`] machine stepped by
//! [`TimerEvent::Reaction`] callbacks; nothing is polled per frame.

use crate::constants::{REACTION_IDLE_DELAY, REACTION_STEP};
use crate::scene::{NodeId, Presentation, Scene};
use crate::scheduler::{Scheduler, TimerEvent};
use std::time::Duration;

/// Idle frame plus the ordered frames a reaction shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    pub idle: &'static str,
    pub steps: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationPhase {
    #[default]
    Idle,
    /// `steps[i]` is on screen, next step pending.
    Playing(usize),
    /// Last step on screen, waiting out the idle delay.
    Cooldown,
}

impl AnimationPhase {
    pub fn is_running(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

#[derive(Clone, Debug)]
pub struct ReactionTiming {
    pub step: Duration,
    pub idle_delay: Duration,
}

impl Default for ReactionTiming {
    fn default() -> Self {
        Self {
            step: REACTION_STEP,
            idle_delay: REACTION_IDLE_DELAY,
        }
    }
}

enum Advance {
    Show(&'static str),
    Done,
}

pub struct ReactionSequencer {
    pub timing: ReactionTiming,
}

impl ReactionSequencer {
    pub fn new(timing: ReactionTiming) -> Self {
        Self { timing }
    }

    /// Start the node's sequence. No-op (returns false) while one is running.
    pub fn play<S, P>(
        &self,
        scene: &mut Scene,
        node: NodeId,
        timers: &mut S,
        out: &mut P,
    ) -> bool
    where
        S: Scheduler + ?Sized,
        P: Presentation + ?Sized,
    {
        let Some((phase, frames)) = animation(scene, node) else {
            return false;
        };
        if phase.is_running() {
            log::trace!("[reaction] {:?} already playing", node);
            return false;
        }

        let (next, delay) = self.enter_step(0, frames.steps.len());
        set_phase(scene, node, next);
        if let Some(first) = frames.steps.first() {
            scene.show_frame(node, *first, out);
        }
        timers.schedule(delay, TimerEvent::Reaction(node));
        log::debug!(
            "[reaction] {:?} started ({} frames)",
            node,
            frames.steps.len()
        );
        true
    }

    /// Handle a [`TimerEvent::Reaction`] for `node`. Returns true when the
    /// node's sequence has just finished.
    pub fn on_timer<S, P>(
        &self,
        scene: &mut Scene,
        node: NodeId,
        timers: &mut S,
        out: &mut P,
    ) -> bool
    where
        S: Scheduler + ?Sized,
        P: Presentation + ?Sized,
    {
        let Some((phase, frames)) = animation(scene, node) else {
            return false;
        };
        let step = match phase {
            AnimationPhase::Idle => return false,
            AnimationPhase::Playing(i) => {
                let (next, delay) = self.enter_step(i + 1, frames.steps.len());
                set_phase(scene, node, next);
                timers.schedule(delay, TimerEvent::Reaction(node));
                Advance::Show(frames.steps[i + 1])
            }
            AnimationPhase::Cooldown => {
                set_phase(scene, node, AnimationPhase::Idle);
                Advance::Done
            }
        };

        match step {
            Advance::Show(frame) => {
                scene.show_frame(node, frame, out);
                false
            }
            Advance::Done => {
                scene.show_frame(node, frames.idle, out);
                self.finish(scene, node, timers, out);
                true
            }
        }
    }

    /// Phase and delay after showing `steps[i]` of a `len`-frame sequence.
    fn enter_step(&self, i: usize, len: usize) -> (AnimationPhase, Duration) {
        if i + 1 < len {
            (AnimationPhase::Playing(i), self.timing.step)
        } else {
            (AnimationPhase::Cooldown, self.timing.idle_delay)
        }
    }

    fn finish<S, P>(&self, scene: &mut Scene, node: NodeId, timers: &mut S, out: &mut P)
    where
        S: Scheduler + ?Sized,
        P: Presentation + ?Sized,
    {
        log::debug!("[reaction] {:?} finished", node);
        let NodeId::Object(id) = node else {
            return;
        };
        let Some((home, base_layer)) = scene.object(id).map(|o| (o.home, o.base_layer)) else {
            return;
        };
        scene.place(node, home, out);
        scene.set_layer(node, base_layer, out);
        // another pour still owns the raised target
        if !scene.objects().iter().any(|o| o.is_animating()) {
            let target_layer = scene.target().base_layer;
            scene.set_layer(NodeId::Target, target_layer, out);
        }
        self.play(scene, NodeId::Target, timers, out);
    }
}

impl Default for ReactionSequencer {
    fn default() -> Self {
        Self::new(ReactionTiming::default())
    }
}

fn animation(scene: &Scene, node: NodeId) -> Option<(AnimationPhase, FrameSequence)> {
    match node {
        NodeId::Object(id) => scene.object(id).map(|o| (o.animation, o.kind.frames())),
        NodeId::Target => {
            let t = scene.target();
            Some((t.animation, t.frames))
        }
    }
}

fn set_phase(scene: &mut Scene, node: NodeId, phase: AnimationPhase) {
    match node {
        NodeId::Object(id) => {
            if let Some(o) = scene.object_mut(id) {
                o.animation = phase;
            }
        }
        NodeId::Target => scene.target_mut().animation = phase,
    }
}
