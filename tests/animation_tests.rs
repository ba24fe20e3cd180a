//! Animation runtime tests.
//!
//! Covers:
//! - KeyframeTrack linear/step/cubic interpolation
//! - Interpolatable trait implementations (f32, Vec3, Quat)
//! - KeyframeCursor sequential access and binary-search fallback
//! - AnimationAction loop modes, reset/play
//! - AnimationClip duration auto-computation

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use glam::{Quat, Vec3};

use vantage::animation::action::{AnimationAction, LoopMode};
use vantage::animation::clip::{AnimationClip, TargetProperty, Track, TrackData};
use vantage::animation::tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
use vantage::animation::values::Interpolatable;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// KeyframeTrack: Linear Interpolation
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_linear_f32_exact_keyframe() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor).unwrap(), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor).unwrap(), 10.0));
    assert!(approx(track.sample_with_cursor(2.0, &mut cursor).unwrap(), 20.0));
}

#[test]
fn track_linear_f32_clamp_beyond_range() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(5.0, &mut cursor).unwrap();
    assert!(approx(val, 10.0), "Expected 10.0, got {val}");
}

#[test]
fn track_linear_f32_before_first() {
    let track = KeyframeTrack::new(
        vec![1.0, 2.0],
        vec![10.0_f32, 20.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 10.0), "Expected 10.0, got {val}");
}

#[test]
fn track_empty_returns_none() {
    let track: KeyframeTrack<f32> = KeyframeTrack::new(vec![], vec![], InterpolationMode::Linear);
    let mut cursor = KeyframeCursor::default();
    assert!(track.sample(0.5).is_none());
    assert!(track.sample_with_cursor(0.5, &mut cursor).is_none());
}

// ============================================================================
// KeyframeTrack: Step Interpolation
// ============================================================================

#[test]
fn track_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor).unwrap(), 0.0));
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor).unwrap(), 0.0));
    assert!(approx(track.sample_with_cursor(0.99, &mut cursor).unwrap(), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor).unwrap(), 100.0));
    assert!(approx(track.sample_with_cursor(1.5, &mut cursor).unwrap(), 100.0));
}

// ============================================================================
// KeyframeTrack: Vec3 and Quat
// ============================================================================

#[test]
fn track_linear_vec3() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val.x, 5.0));
    assert!(approx(val.y, 10.0));
    assert!(approx(val.z, 15.0));
}

#[test]
fn track_linear_quat_slerp() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(PI);

    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![q0, q1], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    let expected = q0.slerp(q1, 0.5);
    let angle = val.angle_between(expected);
    assert!(angle < 0.01, "Quaternion slerp mismatch: angle={angle}");
}

// ============================================================================
// KeyframeTrack: Cubic Spline Interpolation
// ============================================================================

#[test]
fn track_cubic_f32_endpoints() {
    // values = [in_tangent0, value0, out_tangent0, in_tangent1, value1, out_tangent1]
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![
            0.0_f32, 0.0, 1.0, // frame 0
            1.0, 10.0, 0.0, // frame 1
        ],
        InterpolationMode::CubicSpline,
    );

    let mut cursor = KeyframeCursor::default();
    let v0 = track.sample_with_cursor(0.0, &mut cursor).unwrap();
    assert!(approx(v0, 0.0), "got {v0}");
    let v1 = track.sample_with_cursor(1.0, &mut cursor).unwrap();
    assert!(approx(v1, 10.0), "got {v1}");
}

#[test]
fn track_cubic_f32_smooth_midpoint() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![
            0.0_f32, 0.0, 0.0, // frame 0: zero tangents
            0.0, 10.0, 0.0, // frame 1: zero tangents
        ],
        InterpolationMode::CubicSpline,
    );

    // With zero tangents the Hermite midpoint is the value midpoint
    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 5.0), "Cubic midpoint expected 5.0, got {val}");
}

#[test]
fn track_cubic_quat_stays_normalized() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(FRAC_PI_2);
    let zero = Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);

    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![zero, q0, zero, zero, q1, zero],
        InterpolationMode::CubicSpline,
    );

    let mut cursor = KeyframeCursor::default();
    for i in 0..=10 {
        let t = i as f32 * 0.1;
        let val = track.sample_with_cursor(t, &mut cursor).unwrap();
        assert!(
            (val.length() - 1.0).abs() < 1e-4,
            "t={t}: cubic quat not normalized, length={}",
            val.length()
        );
    }
}

// ============================================================================
// Stateless sample() agrees with the cursor path
// ============================================================================

#[test]
fn sample_matches_cursor_across_all_times() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 5.0, 20.0, 15.0],
        InterpolationMode::Linear,
    );
    for i in 0..=40 {
        let t = i as f32 * 0.1;
        let mut cursor = KeyframeCursor::default();
        let val_cursor = track.sample_with_cursor(t, &mut cursor).unwrap();
        let val_sample = track.sample(t).unwrap();
        assert!(
            approx(val_sample, val_cursor),
            "t={t}: sample()={val_sample} != sample_with_cursor()={val_cursor}"
        );
    }
}

// ============================================================================
// KeyframeCursor
// ============================================================================

#[test]
fn cursor_sequential_forward() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 20.0, 30.0, 40.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();

    for i in 0..=20 {
        let t = i as f32 * 0.2;
        let val = track.sample_with_cursor(t, &mut cursor).unwrap();
        let expected = t * 10.0;
        assert!(approx(val, expected), "t={t}: expected {expected}, got {val}");
    }
}

#[test]
fn cursor_forward_then_jump_back() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0],
        vec![0.0_f32, 10.0, 20.0, 30.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();

    let val = track.sample_with_cursor(2.5, &mut cursor).unwrap();
    assert!(approx(val, 25.0));

    // Large jump back falls through to the binary search
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 5.0));
}

#[test]
fn cursor_single_keyframe() {
    let track = KeyframeTrack::new(vec![0.0], vec![42.0_f32], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(5.0, &mut cursor).unwrap();
    assert!(approx(val, 42.0));
}

#[test]
fn cursor_stale_index_resets() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );

    // Cursor left behind by a longer track
    let mut cursor = KeyframeCursor { last_index: 99 };
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 5.0), "got {val}");
}

// ============================================================================
// Interpolatable Implementations
// ============================================================================

#[test]
fn interpolatable_f32_linear() {
    let result = f32::interpolate_linear(&0.0, &10.0, 0.25);
    assert!(approx(result, 2.5));
}

#[test]
fn interpolatable_vec3_linear() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(10.0, 20.0, 30.0);
    let result = Vec3::interpolate_linear(&a, &b, 0.5);
    assert!(approx(result.x, 5.0));
    assert!(approx(result.y, 10.0));
    assert!(approx(result.z, 15.0));
}

#[test]
fn interpolatable_quat_linear_is_slerp() {
    let a = Quat::IDENTITY;
    let b = Quat::from_rotation_y(FRAC_PI_2);
    let result = Quat::interpolate_linear(&a, &b, 0.5);

    let expected = a.slerp(b, 0.5);
    let angle = result.angle_between(expected);
    assert!(angle < 1e-4, "Slerp mismatch: angle={angle}");
}

// ============================================================================
// AnimationAction
// ============================================================================

fn make_simple_clip(duration: f32) -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "test",
        vec![Track {
            node_name: "node".to_string(),
            target: TargetProperty::Translation,
            data: TrackData::Vector3(KeyframeTrack::new(
                vec![0.0, duration],
                vec![Vec3::ZERO, Vec3::X],
                InterpolationMode::Linear,
            )),
        }],
    ))
}

#[test]
fn action_loop_mode_once() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::Once;

    action.update(3.0);
    assert!(
        approx(action.time, 2.0),
        "Once: should clamp to duration, got {}",
        action.time
    );
    assert!(action.paused, "Once: should auto-pause at end");
}

#[test]
fn action_loop_mode_loop() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::Loop;

    action.update(2.5);
    assert!(
        approx(action.time, 0.5),
        "Loop: should wrap to 0.5, got {}",
        action.time
    );
    assert!(!action.paused, "Loop: should NOT auto-pause");
}

#[test]
fn action_loop_mode_ping_pong() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::PingPong;

    // 2.5 into a 2.0 clip: second half of the cycle plays backwards
    action.update(2.5);
    assert!(
        approx(action.time, 1.5),
        "PingPong: expected 1.5, got {}",
        action.time
    );
}

#[test]
fn action_loop_reverse_playback() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::Loop;
    action.time_scale = -1.0;
    action.time = 0.5;

    action.update(1.0);
    assert!(
        action.time > 0.0 && action.time <= 2.0,
        "Loop reverse: time should stay within [0, duration], got {}",
        action.time
    );
}

#[test]
fn action_paused_no_update() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.paused = true;
    action.time = 0.5;

    action.update(1.0);
    assert!(approx(action.time, 0.5), "Paused action should not advance");
}

#[test]
fn action_disabled_no_update() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.enabled = false;
    action.time = 0.5;

    action.update(1.0);
    assert!(approx(action.time, 0.5), "Disabled action should not advance");
}

#[test]
fn action_time_scale() {
    let mut action = AnimationAction::new(make_simple_clip(4.0));
    action.loop_mode = LoopMode::Once;
    action.time_scale = 2.0;

    action.update(1.0);
    assert!(approx(action.time, 2.0), "Expected 2.0, got {}", action.time);
}

#[test]
fn action_reset_rewinds_and_unpauses() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::Once;

    // Play through to the end; Once auto-pauses
    action.update(3.0);
    assert!(action.paused);

    action.reset();
    assert!(approx(action.time, 0.0));
    assert!(!action.paused);

    // Plays again from the start
    action.update(1.0);
    assert!(approx(action.time, 1.0), "got {}", action.time);
}

#[test]
fn action_play_revives_disabled() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.enabled = false;
    action.weight = 0.0;

    action.play();
    assert!(action.enabled);
    assert!(!action.paused);
    assert!(action.weight > 0.0, "play() should restore a usable weight");
}

#[test]
fn action_sample_track_at_current_time() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.time = 1.0;

    use vantage::animation::clip::TrackValue;
    match action.sample_track(0) {
        Some(TrackValue::Vector3(v)) => assert!(approx(v.x, 0.5), "got {v}"),
        other => panic!("expected Vector3 sample, got {other:?}"),
    }
}

// ============================================================================
// AnimationClip Auto-Duration
// ============================================================================

#[test]
fn clip_auto_duration() {
    let clip = AnimationClip::new(
        "test",
        vec![
            Track {
                node_name: "a".to_string(),
                target: TargetProperty::Translation,
                data: TrackData::Vector3(KeyframeTrack::new(
                    vec![0.0, 1.5],
                    vec![Vec3::ZERO, Vec3::X],
                    InterpolationMode::Linear,
                )),
            },
            Track {
                node_name: "b".to_string(),
                target: TargetProperty::Rotation,
                data: TrackData::Quaternion(KeyframeTrack::new(
                    vec![0.0, 3.0],
                    vec![Quat::IDENTITY, Quat::from_rotation_y(1.0)],
                    InterpolationMode::Linear,
                )),
            },
        ],
    );

    assert!(
        approx(clip.duration(), 3.0),
        "Duration should be max of all tracks (3.0), got {}",
        clip.duration()
    );
}

#[test]
fn clip_empty_tracks_zero_duration() {
    let clip = AnimationClip::new("empty", vec![]);
    assert!(approx(clip.duration(), 0.0));
}
