use crate::animation::ease::Ease;
use crate::animation::jitter::Decoration;
use crate::animation::shake::{DEFAULT_SHAKE_INTERVAL_MS, DEFAULT_SHAKE_OFFSET};
use crate::content::cycler::PlaybackPolicy;
use crate::content::label::TextAlign;
use crate::foundation::core::ScreenSize;
use crate::foundation::error::{YanzhiError, YanzhiResult};
use crate::layout::position::PositionSpec;

/// Half-open playback interval `[start, end)` in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[u64; 2]", into = "[u64; 2]")]
pub struct TimeRange {
    start: u64,
    end: u64,
}

impl TimeRange {
    pub fn new(start: u64, end: u64) -> YanzhiResult<Self> {
        if start >= end {
            return Err(YanzhiError::configuration(format!(
                "empty time range [{start}, {end})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn contains(&self, position_ms: u64) -> bool {
        self.start <= position_ms && position_ms < self.end
    }
}

impl TryFrom<[u64; 2]> for TimeRange {
    type Error = YanzhiError;

    fn try_from([start, end]: [u64; 2]) -> YanzhiResult<Self> {
        Self::new(start, end)
    }
}

impl From<TimeRange> for [u64; 2] {
    fn from(r: TimeRange) -> Self {
        [r.start, r.end]
    }
}

fn default_step() -> u32 {
    1
}

fn default_shake_offset() -> i32 {
    DEFAULT_SHAKE_OFFSET
}

fn default_shake_interval() -> u64 {
    DEFAULT_SHAKE_INTERVAL_MS
}

fn default_move_ms() -> u64 {
    200
}

/// One stage mutation issued by a cue.
///
/// Everything except [`Command::is_one_shot`] commands is idempotent, so a cue
/// can re-issue its whole batch on every position update.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    SetText {
        window: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resize: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fixed_size: Option<ScreenSize>,
    },
    SetStyle {
        window: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_size: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        align: Option<TextAlign>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        letter_spacing_px: Option<i32>,
    },
    SetDecorations {
        window: String,
        decorations: Vec<Decoration>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        frequency_ms: Option<u64>,
        #[serde(default)]
        max_offset: i32,
    },
    Load {
        window: String,
        resource: String,
    },
    Unload {
        window: String,
    },
    StartLoop {
        window: String,
        #[serde(default = "default_step")]
        step: u32,
        #[serde(default)]
        policy: PlaybackPolicy,
    },
    StopLoop {
        window: String,
    },
    /// `index: None` advances by one and is therefore one-shot.
    PlayFrame {
        window: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<i64>,
    },
    ResetRotation {
        window: String,
    },
    StartShake {
        window: String,
        #[serde(default = "default_shake_offset")]
        offset: i32,
        #[serde(default = "default_shake_interval")]
        interval_ms: u64,
    },
    StopShake {
        window: String,
    },
    MoveTo {
        window: String,
        position: PositionSpec,
        #[serde(default)]
        force: bool,
    },
    SmoothMoveTo {
        window: String,
        position: PositionSpec,
        #[serde(default = "default_move_ms")]
        duration_ms: u64,
        #[serde(default)]
        ease: Ease,
    },
    FancyLeft {
        window: String,
    },
    Fade {
        window: String,
        opacity: f64,
        #[serde(default = "default_move_ms")]
        duration_ms: u64,
        #[serde(default)]
        ease: Ease,
    },
    Preload {
        resource: String,
    },
    Notify {
        title: String,
        body: String,
    },
}

impl Command {
    /// Target window, for commands that have one.
    pub fn window(&self) -> Option<&str> {
        match self {
            Self::SetText { window, .. }
            | Self::SetStyle { window, .. }
            | Self::SetDecorations { window, .. }
            | Self::Load { window, .. }
            | Self::Unload { window }
            | Self::StartLoop { window, .. }
            | Self::StopLoop { window }
            | Self::PlayFrame { window, .. }
            | Self::ResetRotation { window }
            | Self::StartShake { window, .. }
            | Self::StopShake { window }
            | Self::MoveTo { window, .. }
            | Self::SmoothMoveTo { window, .. }
            | Self::FancyLeft { window }
            | Self::Fade { window, .. } => Some(window.as_str()),
            Self::Preload { .. } | Self::Notify { .. } => None,
        }
    }

    /// Commands with an effect per invocation; these run only when their cue
    /// is entered.
    pub fn is_one_shot(&self) -> bool {
        matches!(
            self,
            Self::Notify { .. } | Self::PlayFrame { index: None, .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SetText { .. } => "set_text",
            Self::SetStyle { .. } => "set_style",
            Self::SetDecorations { .. } => "set_decorations",
            Self::Load { .. } => "load",
            Self::Unload { .. } => "unload",
            Self::StartLoop { .. } => "start_loop",
            Self::StopLoop { .. } => "stop_loop",
            Self::PlayFrame { .. } => "play_frame",
            Self::ResetRotation { .. } => "reset_rotation",
            Self::StartShake { .. } => "start_shake",
            Self::StopShake { .. } => "stop_shake",
            Self::MoveTo { .. } => "move_to",
            Self::SmoothMoveTo { .. } => "smooth_move_to",
            Self::FancyLeft { .. } => "fancy_left",
            Self::Fade { .. } => "fade",
            Self::Preload { .. } => "preload",
            Self::Notify { .. } => "notify",
        }
    }
}

/// A time range, the windows visible inside it, and the commands issued for
/// every position in it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cue {
    pub range: TimeRange,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub visible: Vec<String>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Cue {
    pub fn new(range: TimeRange) -> Self {
        Self {
            range,
            name: String::new(),
            visible: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Every window id the cue refers to.
    pub fn window_refs(&self) -> impl Iterator<Item = &str> {
        self.visible
            .iter()
            .map(String::as_str)
            .chain(self.commands.iter().filter_map(Command::window))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/cue.rs"]
mod tests;
