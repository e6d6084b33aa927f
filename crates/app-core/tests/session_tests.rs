// End-to-end scenarios: landmark frames in, scene changes out.

mod common;

use app_core::*;
use common::{hand_at, Recorder};
use glam::Vec2;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);
const PINK: ObjectId = ObjectId(0);

struct Driver {
    session: Session,
    out: Recorder,
    clock_ms: f64,
}

impl Driver {
    fn new() -> Self {
        let mut session = Session::new(SessionConfig::default(), Scene::potion_table().unwrap());
        let mut out = Recorder::default();
        session.sync(&mut out);
        session.mark_ready();
        Self {
            session,
            out,
            clock_ms: 0.0,
        }
    }

    /// One sampled frame followed by one presentation tick.
    fn frame(&mut self, landmarks: Option<&[[f32; 2]]>) -> Vec<FrameEvent> {
        self.clock_ms += 16.0;
        self.session.on_landmarks(self.clock_ms, landmarks);
        self.session.tick(FRAME, &mut self.out).into_vec()
    }

    fn hand(&mut self, at: Vec2, ratio: f32) -> Vec<FrameEvent> {
        let pts = hand_at(at, ratio);
        self.frame(Some(pts.as_slice()))
    }

    /// Open hand parked at `at` until the smoothed cursor has settled.
    fn settle(&mut self, at: Vec2, ratio: f32) {
        for _ in 0..60 {
            self.hand(at, ratio);
        }
        assert!(self.session.gesture().cursor().distance(at) < 1.0);
    }

    fn home(&self) -> Vec2 {
        self.session.scene().object(PINK).unwrap().home
    }

    fn grab_pink(&mut self) {
        let home = self.home();
        self.settle(home, 0.8);
        assert!(self.hand(home, 0.3).is_empty());
        assert!(self.hand(home, 0.3).is_empty());
        let events = self.hand(home, 0.3);
        assert_eq!(
            events,
            vec![FrameEvent::Interaction(InteractionEvent::Grabbed(PINK))]
        );
    }

    /// Pinch-off frames until a release event appears; returns how many it took.
    fn open_until_release(&mut self, at: Vec2) -> (usize, InteractionEvent) {
        for n in 1..=20 {
            for ev in self.hand(at, 0.7) {
                if let FrameEvent::Interaction(r @ InteractionEvent::Released { .. }) = ev {
                    return (n, r);
                }
            }
        }
        panic!("object was never released");
    }
}

#[test]
fn pinch_over_object_grabs_on_third_frame() {
    let mut d = Driver::new();
    d.grab_pink();
    assert_eq!(d.session.interaction().held(), Some(PINK));
    assert_eq!(d.session.status(), Status::Pinching);
}

#[test]
fn drop_over_cauldron_runs_full_reaction_then_returns_home() {
    let mut d = Driver::new();
    d.grab_pink();

    let over = d.session.scene().target().sprite.position;
    d.settle(over, 0.3);
    let dragged = d.session.scene().object(PINK).unwrap().sprite.position;
    assert!(dragged.distance(over) < 1.0);

    // 4 frames to debounce the pinch off, grace counts 1..3 from the 4th
    let (frames, ev) = d.open_until_release(over);
    assert_eq!(frames, 6);
    assert_eq!(
        ev,
        InteractionEvent::Released {
            object: PINK,
            on_target: true
        }
    );
    assert_eq!(d.session.notice(), Some(POUR_MESSAGE));

    let snap = over + Vec2::new(0.0, -DROP_SNAP_OFFSET_Y);
    assert_eq!(d.session.scene().object(PINK).unwrap().sprite.position, snap);

    let mut finished = Vec::new();
    for _ in 0..150 {
        for ev in d.frame(None) {
            if let FrameEvent::ReactionFinished(node) = ev {
                finished.push(node);
            }
        }
    }
    assert_eq!(finished, vec![NodeId::Object(PINK), NodeId::Target]);

    let pink = PotionKind::Pink.frames();
    let mut expected_frames: Vec<&str> = pink.steps.to_vec();
    expected_frames.push(pink.idle);
    assert_eq!(d.out.frames_for(NodeId::Object(PINK))[1..], expected_frames[..]);

    let obj = d.session.scene().object(PINK).unwrap();
    assert_eq!(obj.sprite.position, obj.home);
    assert_eq!(obj.sprite.frame, pink.idle);
    assert!(!obj.is_animating());
    assert_eq!(d.session.notice(), None);
    assert!(d.session.timers().is_empty());
}

#[test]
fn drop_elsewhere_returns_home_without_reaction() {
    let mut d = Driver::new();
    d.grab_pink();

    let away = Vec2::new(600.0, 250.0);
    d.settle(away, 0.3);
    let (_, ev) = d.open_until_release(away);
    assert_eq!(
        ev,
        InteractionEvent::Released {
            object: PINK,
            on_target: false
        }
    );

    let obj = d.session.scene().object(PINK).unwrap();
    assert_eq!(obj.sprite.position, obj.home);
    assert!(!obj.is_animating());
    assert!(d.session.timers().is_empty());
    assert_eq!(d.session.notice(), None);
    assert_eq!(d.out.frames_for(NodeId::Object(PINK)).len(), 1); // initial sync only
}

#[test]
fn losing_the_hand_freezes_a_held_object() {
    let mut d = Driver::new();
    d.grab_pink();
    let pos = d.session.scene().object(PINK).unwrap().sprite.position;

    for _ in 0..5 {
        assert!(d.frame(None).is_empty());
    }
    assert_eq!(d.session.interaction().held(), Some(PINK));
    assert_eq!(d.session.interaction().phase(), InteractionPhase::Held);
    assert_eq!(d.session.scene().object(PINK).unwrap().sprite.position, pos);

    // the hand returns pinched; re-debouncing fits inside the grace window
    let home = d.home();
    for _ in 0..3 {
        assert!(d.hand(home, 0.3).is_empty());
    }
    assert_eq!(d.session.interaction().held(), Some(PINK));
    assert_eq!(d.session.interaction().phase(), InteractionPhase::Held);
}

#[test]
fn absent_landmarks_keep_cursor_and_clear_pinch() {
    let mut d = Driver::new();
    let at = Vec2::new(300.0, 400.0);
    d.settle(at, 0.3);
    assert!(d.session.gesture().pinching());
    let cursor = d.session.gesture().cursor();

    for _ in 0..5 {
        d.frame(None);
    }
    assert!(!d.session.gesture().has_hand());
    assert!(!d.session.gesture().pinching());
    assert_eq!(d.session.gesture().cursor(), cursor);
    assert_eq!(d.session.status(), Status::NoHand);
}

#[test]
fn repeated_timestamp_is_skipped() {
    let mut session = Session::new(SessionConfig::default(), Scene::potion_table().unwrap());
    let pts = hand_at(Vec2::new(100.0, 100.0), 0.8);
    assert_eq!(
        session.on_landmarks(5.0, Some(pts.as_slice())),
        Intake::Processed(None)
    );
    let cursor = session.gesture().cursor();
    assert_eq!(
        session.on_landmarks(5.0, Some(pts.as_slice())),
        Intake::Duplicate
    );
    assert_eq!(session.gesture().cursor(), cursor);
    assert_eq!(
        session.on_landmarks(6.0, Some(pts.as_slice())),
        Intake::Processed(None)
    );
    assert_ne!(session.gesture().cursor(), cursor);
}

#[test]
fn intake_reports_debounced_pinch_edges() {
    let mut session = Session::new(SessionConfig::default(), Scene::potion_table().unwrap());
    let shut = hand_at(Vec2::new(300.0, 300.0), 0.3);
    let open = hand_at(Vec2::new(300.0, 300.0), 0.7);

    let mut edges = Vec::new();
    for (i, pts) in [&shut, &shut, &shut, &open, &open, &open, &open]
        .into_iter()
        .enumerate()
    {
        match session.on_landmarks(i as f64, Some(pts.as_slice())) {
            Intake::Processed(Some(edge)) => edges.push((i, edge)),
            Intake::Processed(None) => {}
            Intake::Duplicate => panic!("frame {i} treated as duplicate"),
        }
    }
    assert_eq!(edges, vec![(2, PinchEdge::Pressed), (6, PinchEdge::Released)]);

    // a lost hand while pinching reports the release too
    for i in 7..10 {
        session.on_landmarks(i as f64, Some(shut.as_slice()));
    }
    assert_eq!(
        session.on_landmarks(10.0, None),
        Intake::Processed(Some(PinchEdge::Released))
    );
}

#[test]
fn nothing_is_grabbed_before_tracking_is_ready() {
    let mut session = Session::new(SessionConfig::default(), Scene::potion_table().unwrap());
    let mut out = Recorder::default();
    assert_eq!(session.status(), Status::Loading);

    let home = session.scene().object(PINK).unwrap().home;
    let pts = hand_at(home, 0.3);
    for i in 0..80 {
        session.on_landmarks(i as f64, Some(pts.as_slice()));
        assert!(session.tick(FRAME, &mut out).is_empty());
    }
    assert_eq!(session.interaction().held(), None);

    session.mark_ready();
    let events = session.tick(FRAME, &mut out);
    assert_eq!(
        events.into_vec(),
        vec![FrameEvent::Interaction(InteractionEvent::Grabbed(PINK))]
    );
}

#[test]
fn status_messages_follow_hand_state() {
    assert_eq!(Status::Loading.message(), "Loading hand tracking...");
    assert_eq!(Status::NoHand.message(), "Show one hand to the camera");
    assert_eq!(Status::Pinching.message(), "PINCH");
    assert_eq!(Status::Open.message(), "Pinch to grab");

    let mut d = Driver::new();
    assert_eq!(d.session.status(), Status::NoHand);
    d.hand(Vec2::new(200.0, 200.0), 0.8);
    assert_eq!(d.session.status(), Status::Open);
}
