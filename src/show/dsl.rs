use std::collections::HashSet;

use crate::animation::shake::{DEFAULT_SHAKE_INTERVAL_MS, DEFAULT_SHAKE_OFFSET};
use crate::content::cycler::PlaybackPolicy;
use crate::foundation::core::ScreenSize;
use crate::foundation::error::{YanzhiError, YanzhiResult};
use crate::layout::position::{AxisSpec, PositionSpec};
use crate::sequence::cue::{Command, Cue, TimeRange};
use crate::sequence::timeline::Timeline;
use crate::show::model::{ContentDef, LabelDef, Show, WindowDef};
use crate::window::effects::ZoomIn;

pub struct ShowBuilder {
    title: String,
    duration_ms: u64,
    seed: u64,
    preload: Vec<String>,
    font: Option<String>,
    windows: Vec<WindowDef>,
    ids: HashSet<String>,
    cues: Vec<Cue>,
}

impl ShowBuilder {
    pub fn new(title: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            title: title.into(),
            duration_ms,
            seed: 0,
            preload: Vec::new(),
            font: None,
            windows: Vec::new(),
            ids: HashSet::new(),
            cues: Vec::new(),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn preload(mut self, resource: impl Into<String>) -> Self {
        self.preload.push(resource.into());
        self
    }

    pub fn font(mut self, resource: impl Into<String>) -> Self {
        self.font = Some(resource.into());
        self
    }

    pub fn window(mut self, def: WindowDef) -> YanzhiResult<Self> {
        if !self.ids.insert(def.id.clone()) {
            return Err(YanzhiError::configuration(format!(
                "duplicate window id '{}'",
                def.id
            )));
        }
        self.windows.push(def);
        Ok(self)
    }

    pub fn cue(mut self, cue: CueBuilder) -> YanzhiResult<Self> {
        self.cues.push(cue.build()?);
        Ok(self)
    }

    pub fn build(self) -> YanzhiResult<Show> {
        let show = Show {
            title: self.title,
            duration_ms: self.duration_ms,
            seed: self.seed,
            preload: self.preload,
            font: self.font,
            windows: self.windows,
            timeline: Timeline::new(self.cues)?,
        };
        show.validate()?;
        Ok(show)
    }
}

pub struct CueBuilder {
    start: u64,
    end: u64,
    name: String,
    visible: Vec<String>,
    commands: Vec<Command>,
}

impl CueBuilder {
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end,
            name: String::new(),
            visible: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn show<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn cmd(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn build(self) -> YanzhiResult<Cue> {
        Ok(Cue {
            range: TimeRange::new(self.start, self.end)?,
            name: self.name,
            visible: self.visible,
            commands: self.commands,
        })
    }
}

fn window_def(
    id: impl Into<String>,
    content: ContentDef,
    position: PositionSpec,
    size: Option<ScreenSize>,
) -> WindowDef {
    WindowDef {
        id: id.into(),
        title: None,
        content,
        position,
        size,
        shake: false,
        transparent: false,
        hanging: false,
        zoom: None,
    }
}

pub fn frames_window(
    id: impl Into<String>,
    resource: impl Into<String>,
    position: PositionSpec,
    size: ScreenSize,
) -> WindowDef {
    let content = ContentDef::Frames {
        resource: resource.into(),
    };
    window_def(id, content, position, Some(size))
}

pub fn label_window(
    id: impl Into<String>,
    label: LabelDef,
    position: PositionSpec,
    size: ScreenSize,
) -> WindowDef {
    window_def(id, ContentDef::Label(label), position, Some(size))
}

/// Horizontally centered caption whose top edge sits at 35% of the screen.
pub fn float_label_window(id: impl Into<String>, text: impl Into<String>) -> WindowDef {
    let mut def = window_def(
        id,
        ContentDef::FloatLabel { text: text.into() },
        PositionSpec::new(AxisSpec::Centered, AxisSpec::Percent(35)),
        None,
    );
    def.transparent = true;
    def
}

/// Frames window that zooms in and fades each time it is shown.
pub fn zoom_window(
    id: impl Into<String>,
    resource: impl Into<String>,
    size: ScreenSize,
) -> WindowDef {
    let mut def = frames_window(id, resource, PositionSpec::centered(), size);
    def.transparent = true;
    def.zoom = Some(ZoomIn::default());
    def
}

/// Frames window dangling from ropes anchored above the screen.
pub fn hanging_window(
    id: impl Into<String>,
    resource: impl Into<String>,
    position: PositionSpec,
    size: ScreenSize,
) -> WindowDef {
    let mut def = frames_window(id, resource, position, size);
    def.transparent = true;
    def.hanging = true;
    def
}

pub fn load(window: &str, resource: &str) -> Command {
    Command::Load {
        window: window.to_owned(),
        resource: resource.to_owned(),
    }
}

pub fn start_loop(window: &str, step: u32) -> Command {
    start_loop_with(window, step, PlaybackPolicy::Advance)
}

pub fn start_loop_with(window: &str, step: u32, policy: PlaybackPolicy) -> Command {
    Command::StartLoop {
        window: window.to_owned(),
        step,
        policy,
    }
}

pub fn stop_loop(window: &str) -> Command {
    Command::StopLoop {
        window: window.to_owned(),
    }
}

pub fn set_text(window: &str, text: &str) -> Command {
    Command::SetText {
        window: window.to_owned(),
        text: text.to_owned(),
        resize: None,
        fixed_size: None,
    }
}

pub fn start_shake(window: &str) -> Command {
    Command::StartShake {
        window: window.to_owned(),
        offset: DEFAULT_SHAKE_OFFSET,
        interval_ms: DEFAULT_SHAKE_INTERVAL_MS,
    }
}

pub fn stop_shake(window: &str) -> Command {
    Command::StopShake {
        window: window.to_owned(),
    }
}

pub fn move_to(window: &str, position: PositionSpec) -> Command {
    Command::MoveTo {
        window: window.to_owned(),
        position,
        force: false,
    }
}

pub fn fancy_left(window: &str) -> Command {
    Command::FancyLeft {
        window: window.to_owned(),
    }
}

pub fn notify(title: &str, body: &str) -> Command {
    Command::Notify {
        title: title.to_owned(),
        body: body.to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/dsl.rs"]
mod tests;
