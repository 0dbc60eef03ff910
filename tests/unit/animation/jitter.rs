use super::*;

fn two_triangles() -> Vec<Decoration> {
    vec![
        Decoration::new(ScreenPoint::new(64, 86)).size(72).rotation(190.0),
        Decoration::new(ScreenPoint::new(366, 80)).size(72).rotation(166.0),
    ]
}

#[test]
fn empty_to_empty_is_a_noop() {
    let mut j = JitterAnimator::new(1);
    assert!(!j.set_decorations(Vec::new(), DEFAULT_JITTER_FREQUENCY_MS, 0, 0));
    assert_eq!(j.timer().starts(), 0);
    assert!(!j.is_running());
}

#[test]
fn non_empty_list_starts_the_timer() {
    let mut j = JitterAnimator::new(1);
    assert!(j.set_decorations(two_triangles(), 333, 8, 0));
    assert!(j.is_running());
    assert_eq!(j.offsets().len(), 2);
    assert_eq!(j.timer().starts(), 1);

    // Same configuration again: no restart.
    assert!(!j.set_decorations(two_triangles(), 333, 8, 100));
    assert_eq!(j.timer().starts(), 1);
}

#[test]
fn offsets_stay_bounded_and_sized() {
    let mut j = JitterAnimator::new(7);
    j.set_decorations(two_triangles(), 10, 8, 0);
    let mut now = 0;
    for _ in 0..200 {
        now += 10;
        assert!(j.tick(now));
        assert_eq!(j.offsets().len(), j.decorations().len());
        for o in j.offsets() {
            assert!(o.x.abs() <= 8 && o.y.abs() <= 8);
        }
    }
}

#[test]
fn clearing_decorations_stops_and_resets() {
    let mut j = JitterAnimator::new(7);
    j.set_decorations(two_triangles(), 10, 8, 0);
    j.tick(10);
    assert!(j.set_decorations(Vec::new(), 10, 8, 20));
    assert!(!j.is_running());
    assert!(j.offsets().is_empty());
}

#[test]
fn suspended_jitter_resumes_on_show() {
    let mut j = JitterAnimator::new(3);
    j.set_decorations(two_triangles(), 50, 4, 0);
    j.suspend();
    assert!(!j.tick(1_000));
    j.resume(1_000);
    assert!(j.is_running());
    assert!(j.tick(1_050));
}
