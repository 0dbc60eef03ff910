use super::*;
use crate::sequence::cue::TimeRange;

fn cue(start: u64, end: u64) -> Cue {
    Cue::new(TimeRange::new(start, end).unwrap())
}

fn table() -> Timeline {
    Timeline::new(vec![cue(0, 100), cue(100, 250), cue(300, 400)]).unwrap()
}

#[test]
fn find_respects_half_open_boundaries() {
    let t = table();
    assert_eq!(t.find(0).map(|(i, _)| i), Some(0));
    assert_eq!(t.find(99).map(|(i, _)| i), Some(0));
    assert_eq!(t.find(100).map(|(i, _)| i), Some(1));
    assert_eq!(t.find(249).map(|(i, _)| i), Some(1));
    assert_eq!(t.find(250), None);
    assert_eq!(t.find(299), None);
    assert_eq!(t.find(300).map(|(i, _)| i), Some(2));
    assert_eq!(t.find(400), None);
    assert_eq!(t.find(u64::MAX), None);
}

#[test]
fn every_position_maps_to_at_most_one_cue() {
    let t = table();
    for p in 0..500 {
        let hits = t.cues().iter().filter(|c| c.range.contains(p)).count();
        assert!(hits <= 1);
        assert_eq!(t.find(p).is_some(), hits == 1, "position {p}");
    }
}

#[test]
fn overlapping_or_unsorted_cues_are_rejected() {
    assert!(Timeline::new(vec![cue(0, 100), cue(50, 150)]).is_err());
    assert!(Timeline::new(vec![cue(200, 300), cue(0, 100)]).is_err());
}

#[test]
fn unknown_window_is_reported() {
    let mut c = cue(0, 10);
    c.visible = vec!["ghost".into()];
    let t = Timeline::new(vec![c]).unwrap();
    let known: HashSet<&str> = ["yan"].into_iter().collect();
    let err = t.check_windows(&known).unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn deserialization_validates() {
    let bad = r#"[{"range": [0, 100]}, {"range": [90, 120]}]"#;
    assert!(serde_json::from_str::<Timeline>(bad).is_err());
    let good = r#"[{"range": [0, 100]}, {"range": [100, 120]}]"#;
    let t: Timeline = serde_json::from_str(good).unwrap();
    assert_eq!(t.end_ms(), 120);
}
