use super::*;

#[test]
fn wall_clock_is_silent_until_started() {
    let mut c = WallClock::new(1_000);
    assert_eq!(c.poll(10), None);
    c.start(100);
    assert_eq!(c.poll(350), Some(PlaybackEvent::PositionChanged(250)));
}

#[test]
fn wall_clock_reports_end_once() {
    let mut c = WallClock::new(500);
    c.start(0);
    assert_eq!(c.poll(499), Some(PlaybackEvent::PositionChanged(499)));
    assert_eq!(c.poll(500), Some(PlaybackEvent::EndOfMedia));
    assert_eq!(c.poll(600), None);
}

#[test]
fn wall_clock_seek_rebases_position() {
    let mut c = WallClock::new(30_000);
    c.start(0);
    c.poll(40);
    c.seek_to(23_000);
    assert_eq!(c.poll(50), Some(PlaybackEvent::PositionChanged(23_010)));
}

#[test]
fn stop_silences_clock() {
    let mut c = WallClock::new(1_000);
    c.start(0);
    c.stop();
    assert_eq!(c.poll(10), None);
    assert!(c.is_stopped());
}

#[test]
fn manual_clock_records_seeks() {
    let mut c = ManualClock::new();
    c.set_position(5);
    c.seek_to(9_000);
    assert_eq!(c.seeks(), &[9_000]);
    assert_eq!(c.poll(0), Some(PlaybackEvent::PositionChanged(9_000)));
    c.end();
    assert_eq!(c.poll(0), Some(PlaybackEvent::EndOfMedia));
}
