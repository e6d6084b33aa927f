//! Top-level control loop state.
//!
//! A [`Session`] owns everything mutable: the gesture state, the scene, the
//! grip and the timer queue. The sampler feeds it landmark frames, the
//! presentation calls [`Session::tick`] once per drawn frame.

use crate::constants::POUR_NOTICE;
use crate::gesture::{GestureConfig, GesturePipeline, GestureState, PinchEdge};
use crate::interaction::{Interaction, InteractionConfig, InteractionEvent};
use crate::reaction::{ReactionSequencer, ReactionTiming};
use crate::scene::{NodeId, Presentation, Scene};
use crate::scheduler::{Scheduler, TimerEvent, TimerId, TimerQueue};
use smallvec::SmallVec;
use std::time::Duration;

pub const POUR_MESSAGE: &str = "poured potion ingredient!";

#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    pub gesture: GestureConfig,
    pub interaction: InteractionConfig,
    pub reaction: ReactionTiming,
    pub notice: NoticeConfig,
}

#[derive(Clone, Debug)]
pub struct NoticeConfig {
    pub duration: Duration,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            duration: POUR_NOTICE,
        }
    }
}

/// One-line status for the UI chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Loading,
    NoHand,
    Pinching,
    Open,
}

impl Status {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Loading => "Loading hand tracking...",
            Self::NoHand => "Show one hand to the camera",
            Self::Pinching => "PINCH",
            Self::Open => "Pinch to grab",
        }
    }
}

/// Outcome of feeding one sampled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intake {
    /// Same timestamp as the previous frame; ignored.
    Duplicate,
    /// Processed, with the debounced pinch transition it caused, if any.
    Processed(Option<PinchEdge>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    Interaction(InteractionEvent),
    ReactionFinished(NodeId),
}

pub struct Session {
    pipeline: GesturePipeline,
    gesture: GestureState,
    scene: Scene,
    interaction: Interaction,
    reactions: ReactionSequencer,
    timers: TimerQueue,
    notice_duration: Duration,
    notice: Option<(&'static str, TimerId)>,
    last_timestamp: Option<f64>,
    ready: bool,
}

impl Session {
    pub fn new(config: SessionConfig, scene: Scene) -> Self {
        let pipeline = GesturePipeline::new(config.gesture);
        let gesture = pipeline.initial_state();
        Self {
            pipeline,
            gesture,
            scene,
            interaction: Interaction::new(config.interaction),
            reactions: ReactionSequencer::new(config.reaction),
            timers: TimerQueue::new(),
            notice_duration: config.notice.duration,
            notice: None,
            last_timestamp: None,
            ready: false,
        }
    }

    /// Called once the landmark sampler is up and delivering frames.
    pub fn mark_ready(&mut self) {
        if !self.ready {
            log::info!("[session] hand tracking ready");
        }
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Feed one sampled frame. Frames repeating the previous timestamp are
    /// skipped.
    pub fn on_landmarks(&mut self, timestamp_ms: f64, landmarks: Option<&[[f32; 2]]>) -> Intake {
        if self.last_timestamp == Some(timestamp_ms) {
            log::trace!("[session] duplicate frame at {timestamp_ms}ms skipped");
            return Intake::Duplicate;
        }
        self.last_timestamp = Some(timestamp_ms);
        let edge = self.pipeline.process_raw(&mut self.gesture, landmarks);
        match edge {
            Some(PinchEdge::Pressed) => log::debug!("[session] pinch on at {timestamp_ms}ms"),
            Some(PinchEdge::Released) => log::debug!("[session] pinch off at {timestamp_ms}ms"),
            None => {}
        }
        Intake::Processed(edge)
    }

    /// One presentation frame: fire due callbacks, then run the grip while a
    /// hand is in view.
    pub fn tick<P>(&mut self, dt: Duration, out: &mut P) -> SmallVec<[FrameEvent; 4]>
    where
        P: Presentation + ?Sized,
    {
        let mut events = SmallVec::new();

        self.timers.advance(dt);
        while let Some((_, event)) = self.timers.pop_due() {
            match event {
                TimerEvent::Reaction(node) => {
                    let done = self
                        .reactions
                        .on_timer(&mut self.scene, node, &mut self.timers, out);
                    if done {
                        events.push(FrameEvent::ReactionFinished(node));
                    }
                }
                TimerEvent::ClearNotice => self.notice = None,
            }
        }

        // without a hand the grip freezes: no follow, no hover, no grace count
        if !self.ready || !self.gesture.has_hand() {
            return events;
        }

        let update = self.interaction.update(
            self.gesture.signal(),
            &mut self.scene,
            &self.reactions,
            &mut self.timers,
            out,
        );
        if let Some(ev) = update {
            if matches!(ev, InteractionEvent::Released { on_target: true, .. }) {
                self.raise_notice(POUR_MESSAGE);
            }
            events.push(FrameEvent::Interaction(ev));
        }
        events
    }

    fn raise_notice(&mut self, text: &'static str) {
        if let Some((_, old)) = self.notice.take() {
            self.timers.cancel(old);
        }
        let id = self
            .timers
            .schedule(self.notice_duration, TimerEvent::ClearNotice);
        self.notice = Some((text, id));
    }

    pub fn status(&self) -> Status {
        if !self.ready {
            Status::Loading
        } else if !self.gesture.has_hand() {
            Status::NoHand
        } else if self.gesture.pinching() {
            Status::Pinching
        } else {
            Status::Open
        }
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice.map(|(text, _)| text)
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Push the full scene to a freshly created presentation.
    pub fn sync<P: Presentation + ?Sized>(&self, out: &mut P) {
        self.scene.sync(out);
    }
}
