use super::*;

#[test]
fn show_builds_and_validates() {
    let show = yanzhi_show().unwrap();
    assert_eq!(show.duration_ms, DURATION_MS);
    assert_eq!(show.timeline.end_ms(), DURATION_MS);
    assert_eq!(show.windows.len(), 8);
    assert_eq!(show.preload, vec![DRILL.to_owned()]);
    assert_eq!(show.font.as_deref(), Some(FONT));
    assert_eq!(show.timeline.len(), 11);
}

#[test]
fn cue_boundaries_follow_the_song() {
    let show = yanzhi_show().unwrap();
    let name = |p: u64| show.timeline.find(p).map(|(_, c)| c.name.as_str());
    assert_eq!(name(0), Some("intro"));
    assert_eq!(name(9_200), Some("intro"));
    assert_eq!(name(9_720), Some("starring"));
    assert_eq!(name(11_790), Some("starring"));
    assert_eq!(name(11_791), Some("teto2"));
    assert_eq!(name(23_050), Some("eh"));
    assert_eq!(name(25_400), Some("blank"));
    assert_eq!(name(28_649), Some("genius_3"));
    assert_eq!(name(DURATION_MS), None);
}

#[test]
fn group_is_visible_through_the_intro() {
    let show = yanzhi_show().unwrap();
    for p in [0, 9_159, 9_200, 9_719] {
        let (_, cue) = show.timeline.find(p).unwrap();
        for id in GROUP {
            assert!(cue.visible.iter().any(|v| v == id), "{id} at {p}");
        }
    }
}

#[test]
fn group_loops_at_one_rate_and_nobody_shakes_in_the_intro() {
    let show = yanzhi_show().unwrap();
    let (_, intro) = show.timeline.find(0).unwrap();
    assert!(intro.commands.iter().all(|c| matches!(
        c,
        Command::StartLoop { step: 3, .. }
    )));
    assert_eq!(intro.commands.len(), GROUP.len());
}

#[test]
fn show_survives_json() {
    let show = yanzhi_show().unwrap();
    let back = Show::from_json(&show.to_json().unwrap()).unwrap();
    assert_eq!(back, show);
}
