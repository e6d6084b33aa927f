// Gesture stabilization: smoothing, mirroring, hysteresis and debounce.

mod common;

use app_core::*;
use common::{hand_at, hand_with_ratio};
use glam::Vec2;
use rand::prelude::*;

fn feed(pipeline: &GesturePipeline, state: &mut GestureState, pts: &[[f32; 2]]) {
    _ = pipeline.process_raw(state, Some(pts));
}

#[test]
fn pinch_ratio_is_normalized_by_hand_size() {
    let frame = HandFrame::from_points(&hand_with_ratio(0.3)).unwrap();
    assert!((frame.hand_size() - 0.2).abs() < 1e-5);
    assert!((frame.pinch_ratio() - 0.3).abs() < 1e-4);
}

#[test]
fn degenerate_hand_size_is_floored() {
    let mut pts = hand_with_ratio(0.3);
    pts[0] = pts[9];
    let frame = HandFrame::from_points(&pts).unwrap();
    assert_eq!(frame.hand_size(), HAND_SIZE_MIN);
    assert!(frame.pinch_ratio().is_finite());
}

#[test]
fn malformed_landmarks_are_rejected() {
    let short = vec![[0.5, 0.5]; 20];
    assert_eq!(
        HandFrame::from_points(&short),
        Err(LandmarkError::WrongCount {
            expected: 21,
            actual: 20
        })
    );
    let mut nan = hand_with_ratio(0.3);
    nan[8] = [f32::NAN, 0.5];
    assert_eq!(
        HandFrame::from_points(&nan),
        Err(LandmarkError::NonFinite { index: 8 })
    );
}

#[test]
fn pinch_turns_on_on_third_frame_below_on() {
    let pipeline = GesturePipeline::default();
    let mut state = pipeline.initial_state();
    let pinched = hand_with_ratio(0.3);

    feed(&pipeline, &mut state, &pinched);
    assert!(!state.pinching());
    feed(&pipeline, &mut state, &pinched);
    assert!(!state.pinching());
    assert_eq!(
        pipeline.process_raw(&mut state, Some(pinched.as_slice())),
        Some(PinchEdge::Pressed)
    );
    assert!(state.pinching());
    assert!(state.has_hand());
}

#[test]
fn pinch_turns_off_on_fourth_frame_above_off() {
    let pipeline = GesturePipeline::default();
    let mut state = pipeline.initial_state();
    for _ in 0..3 {
        feed(&pipeline, &mut state, &hand_with_ratio(0.3));
    }
    assert!(state.pinching());

    let open = hand_with_ratio(0.7);
    for i in 0..3 {
        feed(&pipeline, &mut state, &open);
        assert!(state.pinching(), "released early on frame {}", i + 1);
    }
    assert_eq!(
        pipeline.process_raw(&mut state, Some(open.as_slice())),
        Some(PinchEdge::Released)
    );
    assert!(!state.pinching());
}

#[test]
fn dead_band_sample_resets_both_streaks_without_flipping() {
    let pipeline = GesturePipeline::default();
    let mut state = pipeline.initial_state();

    feed(&pipeline, &mut state, &hand_with_ratio(0.3));
    feed(&pipeline, &mut state, &hand_with_ratio(0.3));
    assert_eq!(state.on_streak(), 2);
    feed(&pipeline, &mut state, &hand_with_ratio(0.47));
    assert_eq!(state.on_streak(), 0);
    assert_eq!(state.off_streak(), 0);
    assert!(!state.pinching());

    // streak restarts from zero after the dead band
    feed(&pipeline, &mut state, &hand_with_ratio(0.3));
    feed(&pipeline, &mut state, &hand_with_ratio(0.3));
    assert!(!state.pinching());
    feed(&pipeline, &mut state, &hand_with_ratio(0.3));
    assert!(state.pinching());

    feed(&pipeline, &mut state, &hand_with_ratio(0.7));
    feed(&pipeline, &mut state, &hand_with_ratio(0.5));
    assert_eq!(state.off_streak(), 0);
    assert!(state.pinching(), "dead band must not clear an active pinch");
}

#[test]
fn random_ratio_sequences_respect_debounce() {
    let pipeline = GesturePipeline::default();
    let choices = [0.2_f32, 0.35, 0.45, 0.5, 0.6, 0.9];
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let mut state = pipeline.initial_state();
        let ratios: Vec<f32> = (0..200)
            .map(|_| *choices.choose(&mut rng).unwrap())
            .collect();
        let mut prev = state.pinching();
        for (k, r) in ratios.iter().enumerate() {
            feed(&pipeline, &mut state, &hand_with_ratio(*r));
            let now = state.pinching();
            if !prev && now {
                assert!(k >= 2);
                assert!(ratios[k - 2..=k].iter().all(|x| *x < PINCH_ON_RATIO));
            }
            if prev && !now {
                assert!(k >= 3);
                assert!(ratios[k - 3..=k].iter().all(|x| *x > PINCH_OFF_RATIO));
            }
            prev = now;
        }
    }
}

#[test]
fn cursor_target_is_mirrored_and_scaled() {
    let pipeline = GesturePipeline::default();
    let mut pts = hand_with_ratio(0.8);
    pts[8] = [0.25, 0.5];
    let frame = HandFrame::from_points(&pts).unwrap();
    let target = pipeline.cursor_target(&frame);
    assert!((target.x - 600.0).abs() < 1e-3);
    assert!((target.y - 600.0).abs() < 1e-3);
}

#[test]
fn cursor_converges_monotonically_toward_constant_target() {
    let pipeline = GesturePipeline::default();
    let mut state = pipeline.initial_state();
    let target = Vec2::new(120.0, 1000.0);
    let pts = hand_at(target, 0.8);

    let mut last = state.cursor().distance(target);
    for _ in 0..45 {
        feed(&pipeline, &mut state, &pts);
        let d = state.cursor().distance(target);
        assert!(d < last, "distance did not shrink: {d} >= {last}");
        last = d;
    }
    assert!(last < 0.1);
}

#[test]
fn first_frame_moves_cursor_by_alpha() {
    let pipeline = GesturePipeline::default();
    let mut state = pipeline.initial_state();
    let start = state.cursor();
    let target = Vec2::new(100.0, 100.0);
    feed(&pipeline, &mut state, &hand_at(target, 0.8));
    let expected = start + (target - start) * SMOOTHING_ALPHA;
    assert!(state.cursor().distance(expected) < 1e-3);
}

#[test]
fn cursor_stays_within_display_for_out_of_range_landmarks() {
    let pipeline = GesturePipeline::default();
    let mut state = pipeline.initial_state();
    let mut pts = hand_with_ratio(0.8);
    pts[8] = [-0.5, 1.7];
    for _ in 0..100 {
        feed(&pipeline, &mut state, &pts);
        let c = state.cursor();
        assert!(c.x >= 0.0 && c.x <= DISPLAY_WIDTH);
        assert!(c.y >= 0.0 && c.y <= DISPLAY_HEIGHT);
    }
}

#[test]
fn absent_hand_for_five_frames_keeps_cursor() {
    let pipeline = GesturePipeline::default();
    let mut state = pipeline.initial_state();
    for _ in 0..5 {
        feed(&pipeline, &mut state, &hand_at(Vec2::new(200.0, 300.0), 0.3));
    }
    assert!(state.pinching());
    let cursor = state.cursor();

    for _ in 0..5 {
        _ = pipeline.process(&mut state, None);
    }
    assert!(!state.has_hand());
    assert!(!state.pinching());
    assert_eq!(state.on_streak(), 0);
    assert_eq!(state.off_streak(), 0);
    assert_eq!(state.cursor(), cursor);
}

#[test]
fn malformed_frame_counts_as_no_hand_for_that_frame_only() {
    let pipeline = GesturePipeline::default();
    let mut state = pipeline.initial_state();
    feed(&pipeline, &mut state, &hand_with_ratio(0.8));
    let cursor = state.cursor();

    let broken = vec![[0.5, 0.5]; 3];
    feed(&pipeline, &mut state, &broken);
    assert!(!state.has_hand());
    assert_eq!(state.cursor(), cursor);

    feed(&pipeline, &mut state, &hand_with_ratio(0.8));
    assert!(state.has_hand());
}
