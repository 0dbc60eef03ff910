use super::*;
use crate::assets::frames::{KeyframeMap, MemoryFrameSource};
use crate::content::cycler::PlaybackPolicy;
use crate::foundation::core::ScreenSize;
use crate::layout::position::PositionSpec;
use crate::notify::MemoryNotifier;
use crate::show::model::LabelDef;

fn source() -> MemoryFrameSource {
    let mut src = MemoryFrameSource::new();
    let size = ScreenSize::new(16, 16);
    src.insert_flat("frames/yan", 6, size, None).unwrap();
    let keys = KeyframeMap::new([(1, "0002.png".to_owned())]);
    src.insert_flat("frames/drill", 3, size, Some(keys)).unwrap();
    src
}

fn stage_with(notifier: MemoryNotifier) -> Stage {
    let mut stage = Stage::new(
        ScaleContext::identity(),
        Box::new(source()),
        Box::new(notifier),
        42,
    );
    stage
        .add_window(&WindowDef {
            id: "yan".into(),
            title: Some("胭".into()),
            content: ContentDef::Frames {
                resource: "frames/yan".into(),
            },
            position: PositionSpec::at(230, 342),
            size: Some(ScreenSize::new(450, 450)),
            shake: false,
            transparent: false,
            hanging: false,
            zoom: None,
        })
        .unwrap();
    stage
        .add_window(&WindowDef {
            id: "text".into(),
            title: None,
            content: ContentDef::Label(LabelDef::default()),
            position: PositionSpec::at(147, 60),
            size: Some(ScreenSize::new(890, 960)),
            shake: true,
            transparent: false,
            hanging: false,
            zoom: None,
        })
        .unwrap();
    stage
}

fn stage() -> Stage {
    stage_with(MemoryNotifier::new())
}

#[test]
fn missing_frames_fail_window_creation() {
    let mut stage = stage();
    let err = stage
        .add_window(&WindowDef {
            id: "ghost".into(),
            title: None,
            content: ContentDef::Frames {
                resource: "frames/none".into(),
            },
            position: PositionSpec::centered(),
            size: None,
            shake: false,
            transparent: false,
            hanging: false,
            zoom: None,
        })
        .unwrap_err();
    assert!(matches!(err, YanzhiError::ResourceLoad(_)));
}

#[test]
fn visibility_matches_requested_set() {
    let mut stage = stage();
    stage.apply_visibility(&["yan".into()]);
    assert_eq!(stage.visible_ids(), vec!["yan"]);
    stage.apply_visibility(&["text".into()]);
    assert_eq!(stage.visible_ids(), vec!["text"]);
    stage.apply_visibility(&[]);
    assert!(stage.visible_ids().is_empty());
}

#[test]
fn window_shake_flag_starts_on_first_show() {
    let mut stage = stage();
    assert!(!stage.window("text").unwrap().shake().is_running());
    stage.apply_visibility(&["text".into()]);
    assert!(stage.window("text").unwrap().shake().is_running());
}

#[test]
fn commands_against_unknown_windows_fail() {
    let mut stage = stage();
    let err = stage
        .apply(&Command::StopShake {
            window: "nope".into(),
        })
        .unwrap_err();
    assert!(err.to_string().contains("nope"));
}

#[test]
fn label_commands_on_frame_window_fail() {
    let mut stage = stage();
    let cmd = Command::SetText {
        window: "yan".into(),
        text: "x".into(),
        resize: None,
        fixed_size: None,
    };
    assert!(matches!(
        stage.apply(&cmd),
        Err(YanzhiError::Configuration(_))
    ));
}

#[test]
fn load_uses_preload_cache() {
    let mut stage = stage();
    let cached = stage.preload("frames/drill").unwrap();
    stage
        .apply(&Command::Load {
            window: "yan".into(),
            resource: "frames/drill".into(),
        })
        .unwrap();
    let w = stage.window("yan").unwrap();
    assert_eq!(w.resource(), "frames/drill");
    assert!(Arc::ptr_eq(w.cycler().unwrap().frame_set(), &cached));
}

#[test]
fn repeated_load_keeps_cycler_state() {
    let mut stage = stage();
    let load = Command::Load {
        window: "yan".into(),
        resource: "frames/drill".into(),
    };
    stage.apply(&load).unwrap();
    stage
        .apply(&Command::PlayFrame {
            window: "yan".into(),
            index: Some(2),
        })
        .unwrap();
    stage.apply(&load).unwrap();
    assert_eq!(stage.window("yan").unwrap().cycler().unwrap().index(), 2);
}

#[test]
fn loop_runs_only_while_visible() {
    let mut stage = stage();
    stage.apply_visibility(&["yan".into()]);
    stage
        .apply(&Command::StartLoop {
            window: "yan".into(),
            step: 3,
            policy: PlaybackPolicy::Advance,
        })
        .unwrap();
    assert!(stage.tick(100));
    assert_eq!(stage.window("yan").unwrap().cycler().unwrap().index(), 1);

    stage.set_now(100);
    stage.apply_visibility(&[]);
    stage.tick(1_000);
    assert_eq!(stage.window("yan").unwrap().cycler().unwrap().index(), 1);
}

#[test]
fn notify_goes_to_notifier() {
    let notifier = MemoryNotifier::new();
    let mut stage = stage_with(notifier.clone());
    stage
        .apply(&Command::Notify {
            title: "Teto".into(),
            body: "hi".into(),
        })
        .unwrap();
    assert_eq!(notifier.sent(), vec![("Teto".to_owned(), "hi".to_owned())]);
}

#[test]
fn keyframe_loop_without_map_is_logged_not_fatal() {
    let mut stage = stage();
    stage.apply_visibility(&["yan".into()]);
    stage
        .apply(&Command::StartLoop {
            window: "yan".into(),
            step: 1,
            policy: PlaybackPolicy::Keyframe,
        })
        .unwrap();
    stage.tick(100);
    assert!(!stage.window("yan").unwrap().cycler().unwrap().is_looping());
}

#[test]
fn stop_loop_on_a_label_window_is_a_configuration_error() {
    let mut stage = stage();
    let err = stage
        .apply(&Command::StopLoop {
            window: "text".into(),
        })
        .unwrap_err();
    assert!(matches!(err, YanzhiError::Configuration(_)));
}

#[test]
fn float_label_is_sized_by_its_text_and_see_through() {
    let font = std::fs::read("tests/data/fonts/DejaVuSansMono.ttf").unwrap();
    let mut stage = Stage::new(
        ScaleContext::new(ScreenSize::new(2560, 1440)).unwrap(),
        Box::new(source()),
        Box::new(MemoryNotifier::new()),
        42,
    );
    stage.text = TextEngine::from_font_bytes(font).unwrap();
    stage
        .add_window(&crate::show::dsl::float_label_window("caption", "hello"))
        .unwrap();

    let w = stage.window("caption").unwrap();
    assert!(w.is_transparent());
    assert_eq!(w.label().unwrap().style().background.a, 0);
    let p = w.placement();
    assert!(p.size.width > 0 && p.size.height > 0);
    assert!((2 * p.origin.x + p.size.width as i32 - 2560).abs() <= 1);
    assert_eq!(p.origin.y, 504);
}

#[test]
fn show_font_is_read_from_the_source() {
    let font = std::fs::read("tests/data/fonts/DejaVuSansMono.ttf").unwrap();
    let show = crate::show::dsl::ShowBuilder::new("t", 1_000)
        .font("resources/pen.ttf")
        .window(crate::show::dsl::float_label_window("caption", "hi"))
        .unwrap()
        .build()
        .unwrap();

    let missing = Stage::from_show(
        &show,
        ScaleContext::identity(),
        Box::new(source()),
        Box::new(MemoryNotifier::new()),
    );
    assert!(matches!(missing, Err(YanzhiError::ResourceLoad(_))));

    let stage = Stage::from_show(
        &show,
        ScaleContext::identity(),
        Box::new(source().with_font("resources/pen.ttf", font)),
        Box::new(MemoryNotifier::new()),
    )
    .unwrap();
    assert!(stage.text().has_font());
    assert!(stage.window("caption").unwrap().size().width > 1);
}
