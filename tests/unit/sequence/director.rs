use super::*;
use crate::assets::frames::MemoryFrameSource;
use crate::foundation::core::ScreenSize;
use crate::layout::position::PositionSpec;
use crate::layout::scale::ScaleContext;
use crate::notify::MemoryNotifier;
use crate::sequence::clock::ManualClock;
use crate::sequence::cue::{Command, Cue, TimeRange};
use crate::show::model::{ContentDef, WindowDef};

fn cue(start: u64, end: u64, visible: &[&str], commands: Vec<Command>) -> Cue {
    let mut c = Cue::new(TimeRange::new(start, end).unwrap());
    c.visible = visible.iter().map(|s| (*s).to_owned()).collect();
    c.commands = commands;
    c
}

fn stage(notifier: MemoryNotifier) -> Stage {
    let src = MemoryFrameSource::with_placeholders(4, ScreenSize::new(8, 8));
    let mut stage = Stage::new(
        ScaleContext::identity(),
        Box::new(src),
        Box::new(notifier),
        0,
    );
    for id in ["a", "b"] {
        stage
            .add_window(&WindowDef {
                id: id.into(),
                title: None,
                content: ContentDef::Frames {
                    resource: format!("frames/{id}"),
                },
                position: PositionSpec::centered(),
                size: None,
                shake: false,
                transparent: false,
                hanging: false,
                zoom: None,
            })
            .unwrap();
    }
    stage
}

fn timeline() -> Timeline {
    Timeline::new(vec![
        cue(
            0,
            100,
            &["a"],
            vec![Command::StartLoop {
                window: "a".into(),
                step: 3,
                policy: Default::default(),
            }],
        ),
        cue(
            100,
            200,
            &["b"],
            vec![
                Command::Notify {
                    title: "t".into(),
                    body: "b".into(),
                },
                Command::StopShake {
                    window: "missing".into(),
                },
                Command::StartShake {
                    window: "b".into(),
                    offset: 1,
                    interval_ms: 33,
                },
            ],
        ),
        cue(300, 400, &[], vec![]),
    ])
    .unwrap()
}

#[test]
fn dispatch_applies_cue_visibility() {
    let mut stage = stage(MemoryNotifier::new());
    let mut d = SequenceDirector::new(timeline(), DebugConfig::default());
    assert_eq!(d.dispatch(50, &mut stage), Some(0));
    assert_eq!(stage.visible_ids(), vec!["a"]);
    assert!(stage.window("a").unwrap().cycler().unwrap().is_looping());
    assert_eq!(d.dispatch(150, &mut stage), Some(1));
    assert_eq!(stage.visible_ids(), vec!["b"]);
}

#[test]
fn gap_positions_change_nothing() {
    let mut stage = stage(MemoryNotifier::new());
    let mut d = SequenceDirector::new(timeline(), DebugConfig::default());
    d.dispatch(150, &mut stage);
    assert_eq!(d.dispatch(250, &mut stage), None);
    assert_eq!(stage.visible_ids(), vec!["b"]);
}

#[test]
fn failing_command_does_not_stop_the_batch() {
    let mut stage = stage(MemoryNotifier::new());
    let mut d = SequenceDirector::new(timeline(), DebugConfig::default());
    d.dispatch(150, &mut stage);
    assert!(stage.window("b").unwrap().shake().is_running());
}

#[test]
fn one_shot_runs_once_per_cue_entry() {
    let notifier = MemoryNotifier::new();
    let mut stage = stage(notifier.clone());
    let mut d = SequenceDirector::new(timeline(), DebugConfig::default());
    for p in (100..200).step_by(16) {
        d.dispatch(p, &mut stage);
    }
    assert_eq!(notifier.sent().len(), 1);
    d.dispatch(50, &mut stage);
    d.dispatch(120, &mut stage);
    assert_eq!(notifier.sent().len(), 2);
}

#[test]
fn start_from_seeks_once() {
    let mut stage = stage(MemoryNotifier::new());
    let cfg = DebugConfig {
        start_from_ms: 150,
        ..DebugConfig::default()
    };
    let mut d = SequenceDirector::new(timeline(), cfg);
    let mut clock = ManualClock::new();
    assert_eq!(d.on_position_changed(0, &mut stage, &mut clock), None);
    assert_eq!(clock.seeks(), &[150]);
    // A later backward position is dispatched normally.
    assert_eq!(d.on_position_changed(10, &mut stage, &mut clock), Some(0));
    assert_eq!(clock.seeks().len(), 1);
}

#[test]
fn stop_at_stops_clock_and_schedules_exit() {
    let mut stage = stage(MemoryNotifier::new());
    stage.set_now(5_000);
    let cfg = DebugConfig {
        stop_at_ms: 120,
        ..DebugConfig::default()
    };
    let mut d = SequenceDirector::new(timeline(), cfg);
    let mut clock = ManualClock::new();
    assert_eq!(d.on_position_changed(50, &mut stage, &mut clock), Some(0));
    assert_eq!(d.on_position_changed(130, &mut stage, &mut clock), None);
    assert!(clock.is_stopped());
    assert_eq!(d.exit_at(), Some(5_000 + EXIT_GRACE_MS));
}

#[test]
fn end_of_media_keeps_first_deadline() {
    let mut d = SequenceDirector::new(timeline(), DebugConfig::default());
    d.on_end_of_media(1_000);
    d.on_end_of_media(1_500);
    assert!(!d.should_exit(2_999));
    assert!(d.should_exit(3_000));
}
