use super::*;

#[test]
fn tween_hits_endpoints() {
    let t = Tween::new(0.0, 10.0, 100, 200, Ease::Linear);
    assert_eq!(t.sample(0), 0.0);
    assert_eq!(t.sample(200), 5.0);
    assert_eq!(t.sample(300), 10.0);
    assert!(t.is_finished(300));
}

#[test]
fn zero_duration_jumps_to_target() {
    let t = Tween::new(1.0, 2.0, 0, 0, Ease::OutCubic);
    assert_eq!(t.sample(0), 2.0);
}

#[test]
fn chained_segments_play_back_to_back() {
    let start = Point::new(100.0, 50.0);
    let mut m = Motion::chain(
        start,
        [
            Segment {
                to: Point::new(140.0, 50.0),
                duration_ms: 300,
                ease: Ease::OutCubic,
            },
            Segment {
                to: Point::new(-400.0, 50.0),
                duration_ms: 300,
                ease: Ease::InCubic,
            },
        ],
        0,
    );
    assert_eq!(m.target(), Point::new(-400.0, 50.0));

    let mid_first = m.advance(150);
    assert!(mid_first.position.x > 100.0 && mid_first.position.x < 140.0);

    let at_join = m.advance(300);
    assert_eq!(at_join.position, Point::new(140.0, 50.0));
    assert!(!at_join.finished);

    let done = m.advance(600);
    assert!(done.finished);
    assert_eq!(done.position, Point::new(-400.0, 50.0));
}

#[test]
fn skipping_past_a_leg_lands_in_the_next_one() {
    let mut m = Motion::chain(
        Point::ZERO,
        [
            Segment {
                to: Point::new(10.0, 0.0),
                duration_ms: 100,
                ease: Ease::Linear,
            },
            Segment {
                to: Point::new(20.0, 0.0),
                duration_ms: 100,
                ease: Ease::Linear,
            },
        ],
        0,
    );
    let s = m.advance(150);
    assert_eq!(s.position, Point::new(15.0, 0.0));
}
