use super::*;
use crate::assets::frames::{KeyframeMap, flat_frames};
use crate::foundation::core::ScreenSize;

fn set(n: usize, keyframes: Option<KeyframeMap>) -> Arc<FrameSet> {
    let frames = flat_frames("t", n, ScreenSize::new(4, 4));
    Arc::new(FrameSet::new("t", frames, keyframes).unwrap())
}

fn keyframes() -> KeyframeMap {
    KeyframeMap::new([
        (1, "0003.png".to_owned()),
        (2, "0003.png".to_owned()),
        (3, "0001.png".to_owned()),
    ])
}

#[test]
fn advance_wraps_at_the_end() {
    let mut c = FrameCycler::new(set(3, None));
    c.play_frame(None).unwrap();
    c.play_frame(None).unwrap();
    assert_eq!(c.index(), 2);
    c.play_frame(None).unwrap();
    assert_eq!(c.index(), 0);
}

#[test]
fn explicit_and_negative_indices() {
    let mut c = FrameCycler::new(set(5, None));
    c.play_frame(Some(3)).unwrap();
    assert_eq!(c.index(), 3);
    c.play_frame(Some(-1)).unwrap();
    assert_eq!(c.index(), 4);
    c.play_frame(Some(-5)).unwrap();
    assert_eq!(c.index(), 0);
    c.play_frame(Some(0)).unwrap();
    assert_eq!(c.index(), 0);
}

#[test]
fn out_of_range_index_is_an_error_and_keeps_cursor() {
    let mut c = FrameCycler::new(set(5, None));
    c.play_frame(Some(2)).unwrap();
    for bad in [5, -6, 100] {
        let err = c.play_frame(Some(bad)).unwrap_err();
        assert!(matches!(err, YanzhiError::IndexOutOfRange { len: 5, .. }));
    }
    assert_eq!(c.index(), 2);
}

#[test]
fn loop_advances_at_fps_over_step() {
    let mut c = FrameCycler::new(set(10, None));
    c.start_loop(3, PlaybackPolicy::Advance, 0);
    assert!(!c.tick(50).unwrap());
    assert!(c.tick(100).unwrap());
    assert_eq!(c.index(), 1);
    // Late tick owes three steps at once.
    assert!(c.tick(400).unwrap());
    assert_eq!(c.index(), 4);
}

#[test]
fn keyframe_track_halts_at_first_missing_counter() {
    let mut c = FrameCycler::new(set(5, Some(keyframes())));
    c.start_loop(1, PlaybackPolicy::Keyframe, 0);
    c.tick(34).unwrap();
    assert_eq!(c.index(), 3);
    c.tick(67).unwrap();
    assert_eq!(c.index(), 3);
    c.tick(100).unwrap();
    assert_eq!(c.index(), 1);
    assert!(c.is_looping());

    c.tick(134).unwrap();
    assert!(c.keyframes_exhausted());
    assert!(!c.is_looping());
    assert_eq!(c.index(), 1);

    // Re-issuing the loop after exhaustion is ignored.
    c.start_loop(1, PlaybackPolicy::Keyframe, 200);
    assert!(!c.is_looping());
}

#[test]
fn keyframe_without_map_is_a_configuration_error() {
    let mut c = FrameCycler::new(set(2, None));
    let err = c.play_keyframe().unwrap_err();
    assert!(matches!(err, YanzhiError::Configuration(_)));
}

#[test]
fn same_step_restart_is_noop_and_new_step_retunes() {
    let mut c = FrameCycler::new(set(10, None));
    c.start_loop(3, PlaybackPolicy::Advance, 0);
    c.start_loop(3, PlaybackPolicy::Advance, 90);
    // Clock was not restarted at 90.
    assert!(c.tick(100).unwrap());
    c.start_loop(1, PlaybackPolicy::Advance, 100);
    assert_eq!(c.loop_state(), Some((1, PlaybackPolicy::Advance)));
}

#[test]
fn rotation_accumulates_and_resets() {
    let mut c = FrameCycler::new(set(2, None));
    c.rotate_frame(10.0);
    c.rotate_frame(5.0);
    assert!((c.angle() - 15.0).abs() < 1e-9);
    assert!((c.display_angle() - 15.0).abs() < 1e-9);
    assert_eq!(c.current_image().dimensions(), (4, 4));
    c.reset_rotation();
    assert_eq!(c.angle(), 0.0);
    assert_eq!(c.display_angle(), 0.0);
}

#[test]
fn playing_a_frame_drops_the_drawn_rotation_but_keeps_the_angle() {
    let mut c = FrameCycler::new(set(3, None));
    c.rotate_frame(30.0);
    c.play_frame(Some(0)).unwrap();
    assert_eq!(c.display_angle(), 0.0);
    c.rotate_frame(30.0);
    assert!((c.display_angle() - 60.0).abs() < 1e-9);
}

#[test]
fn rotate_loop_applies_owed_steps_at_once() {
    let mut c = FrameCycler::new(set(1, None));
    c.start_loop(1, PlaybackPolicy::Rotate, 0);
    c.tick(100).unwrap();
    assert!((c.angle() - 3.0 * DEFAULT_ROTATE_STEP_DEG).abs() < 1e-9);
}

#[test]
fn suspend_parks_loop_and_resume_restores_it() {
    let mut c = FrameCycler::new(set(10, None));
    c.start_loop(2, PlaybackPolicy::Advance, 0);
    c.suspend();
    assert!(!c.is_looping());
    assert_eq!(c.loop_state(), Some((2, PlaybackPolicy::Advance)));
    assert!(!c.tick(1_000).unwrap());

    c.resume(1_000);
    assert!(c.is_looping());
    assert!(c.tick(1_067).unwrap());
    assert_eq!(c.index(), 1);
}

#[test]
fn start_while_suspended_waits_for_resume() {
    let mut c = FrameCycler::new(set(4, None));
    c.suspend();
    c.start_loop(1, PlaybackPolicy::Advance, 0);
    assert!(!c.is_looping());
    c.resume(500);
    assert!(c.is_looping());
}

#[test]
fn stop_loop_discards_parked_request() {
    let mut c = FrameCycler::new(set(4, None));
    c.suspend();
    c.start_loop(1, PlaybackPolicy::Advance, 0);
    c.stop_loop();
    c.resume(10);
    assert!(!c.is_looping());
}
