//! The built-in 胭脂 show.

use crate::animation::jitter::{Decoration, DecorationShape};
use crate::content::cycler::PlaybackPolicy;
use crate::content::label::{LabelStyle, TextAlign};
use crate::foundation::color::palette;
use crate::foundation::core::{ScreenPoint, ScreenSize};
use crate::foundation::error::YanzhiResult;
use crate::layout::position::{AxisSpec, PositionSpec, Side};
use crate::sequence::cue::Command;
use crate::show::dsl::{
    CueBuilder, ShowBuilder, fancy_left, frames_window, label_window, load, notify, set_text,
    start_loop, start_loop_with, start_shake, stop_shake,
};
use crate::show::model::{ContentDef, LabelDef, Show, WindowDef};

pub const DURATION_MS: u64 = 30_000;

const GROUP: [&str; 3] = ["small_teto1", "yan", "zhi"];
const DRILL: &str = "frames/drill_teto";
const FONT: &str = "resources/mogihaPen.ttf";

const EH_1: &str =
    "<span style='font-size:560px;'>え</span><span style='font-size:160px;'>？</span><br>　　";
const EH_2: &str =
    "<span style='font-size:560px;'>え</span><span style='font-size:160px;'>？</span><br>うそ";
const GENIUS_1: &str = "私 　　\n　　　　\n　　　　";
const GENIUS_2: &str = "私 天才\n　　　　\n　　　　";
const GENIUS_3: &str = "私 天才\nじゃない\n　の？　";

fn titled(mut def: WindowDef, title: &str) -> WindowDef {
    def.title = Some(title.to_owned());
    def
}

fn text_style(size: u32) -> LabelStyle {
    LabelStyle {
        font_size: Some(size),
        align: TextAlign::Right,
        ..LabelStyle::default()
    }
}

fn windows() -> Vec<WindowDef> {
    let teto = ScreenSize::new(620, 600);
    let char_size = ScreenSize::new(450, 450);
    let text_pos = PositionSpec::at(147, 60);
    let text_size = ScreenSize::new(890, 960);

    let starring = LabelDef {
        image: Some("frames/starring".into()),
        decorations: vec![
            Decoration::new(ScreenPoint::new(64, 86)).size(72).rotation(190.0),
            Decoration::new(ScreenPoint::new(366, 80)).size(72).rotation(166.0),
        ],
        jitter_frequency_ms: 333,
        jitter_offset: 8,
        ..LabelDef::default()
    };

    let eh = LabelDef {
        style: text_style(200),
        decorations: vec![
            Decoration::new(ScreenPoint::new(240, 480))
                .shape(DecorationShape::Circle)
                .size(400),
            Decoration::new(ScreenPoint::new(240, 480))
                .shape(DecorationShape::Circle)
                .color(palette::BG)
                .size(200),
        ],
        ..LabelDef::default()
    };

    let genius = LabelDef {
        style: text_style(160),
        decorations: vec![
            Decoration::new(ScreenPoint::new(300, 240))
                .shape(DecorationShape::Rectangle)
                .size(160)
                .rotation(45.0),
            Decoration::new(ScreenPoint::new(300, 240))
                .shape(DecorationShape::Rectangle)
                .color(palette::BG)
                .size(80)
                .rotation(45.0),
        ],
        ..LabelDef::default()
    };

    let mut text1 = label_window("text1", eh, text_pos.clone(), text_size);
    text1.shake = true;
    let mut text2 = label_window("text2", genius, text_pos, text_size);
    text2.shake = true;

    vec![
        titled(
            frames_window("yan", "frames/yan", PositionSpec::at(230, 342), char_size),
            "胭",
        ),
        titled(
            frames_window("zhi", "frames/zhi", PositionSpec::at(1280, 342), char_size),
            "脂",
        ),
        titled(
            frames_window("small_teto1", "frames/small_teto1", PositionSpec::at(660, 246), teto),
            "神秘红色钻头",
        ),
        titled(
            label_window(
                "starring",
                starring,
                PositionSpec::at(729, 445),
                ScreenSize::new(460, 200),
            ),
            "Starring",
        ),
        titled(
            frames_window("small_teto2", "frames/small_teto2", PositionSpec::at(660, 246), teto),
            "神秘白色钻头",
        ),
        text1,
        text2,
        WindowDef {
            id: "drill".into(),
            title: Some("钻头".into()),
            content: ContentDef::Empty,
            position: PositionSpec::new(
                AxisSpec::Gap {
                    side: Side::Right,
                    units: 120,
                },
                AxisSpec::Centered,
            ),
            size: Some(teto),
            shake: false,
            transparent: false,
            hanging: false,
            zoom: None,
        },
    ]
}

fn group_loop(cue: CueBuilder, step: u32) -> CueBuilder {
    GROUP
        .iter()
        .fold(cue.show(GROUP), |cue, id| cue.cmd(start_loop(id, step)))
}

fn drill(cue: CueBuilder) -> CueBuilder {
    cue.cmd(load("drill", DRILL))
        .cmd(start_loop_with("drill", 1, PlaybackPolicy::Keyframe))
}

fn genius(start: u64, end: u64, text: &str) -> CueBuilder {
    CueBuilder::new(start, end)
        .show(["text2"])
        .cmd(Command::MoveTo {
            window: "text2".into(),
            position: PositionSpec::at(147, 60),
            force: true,
        })
        .cmd(set_text("text2", text))
}

/// Windows, preloads and the cue table of the show.
pub fn yanzhi_show() -> YanzhiResult<Show> {
    let mut builder = ShowBuilder::new("胭脂", DURATION_MS)
        .seed(0x5EED)
        .font(FONT)
        .preload(DRILL);
    for w in windows() {
        builder = builder.window(w)?;
    }
    builder
        .cue(group_loop(CueBuilder::new(0, 9_720).name("intro"), 3))?
        .cue(CueBuilder::new(9_720, 11_791).name("starring").show(["starring"]))?
        .cue(
            CueBuilder::new(11_791, 20_459)
                .name("teto2")
                .show(["small_teto2", "yan", "zhi"])
                .cmd(start_loop("small_teto2", 3))
                .cmd(start_loop("yan", 3))
                .cmd(start_loop("zhi", 3)),
        )?
        .cue(
            CueBuilder::new(20_459, 23_000)
                .name("teto2_rush")
                .show(["small_teto2"])
                .cmd(start_loop("small_teto2", 1)),
        )?
        .cue(drill(
            CueBuilder::new(23_000, 24_116)
                .name("eh")
                .show(["text1", "drill"])
                .cmd(set_text("text1", EH_1))
                .cmd(start_shake("text1"))
                .cmd(notify("胭脂", "え？")),
        ))?
        .cue(drill(
            CueBuilder::new(24_116, 25_360)
                .name("uso")
                .show(["text1", "drill"])
                .cmd(set_text("text1", EH_2))
                .cmd(start_shake("text1")),
        ))?
        .cue(
            CueBuilder::new(25_360, 25_560)
                .name("blank")
                .cmd(stop_shake("text1")),
        )?
        .cue(genius(25_560, 26_000, GENIUS_1).name("genius_1"))?
        .cue(genius(26_000, 26_700, GENIUS_2).name("genius_2"))?
        .cue(genius(26_700, 28_650, GENIUS_3).name("genius_3"))?
        .cue(
            CueBuilder::new(28_650, DURATION_MS)
                .name("exit")
                .show(["text2"])
                .cmd(set_text("text2", GENIUS_3))
                .cmd(fancy_left("text2")),
        )?
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/show/yanzhi.rs"]
mod tests;
