use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

use crate::animation::jitter::{DEFAULT_JITTER_FREQUENCY_MS, Decoration};
use crate::content::label::LabelStyle;
use crate::foundation::core::ScreenSize;
use crate::foundation::error::{YanzhiError, YanzhiResult};
use crate::layout::position::PositionSpec;
use crate::sequence::timeline::Timeline;
use crate::window::effects::ZoomIn;

fn default_jitter_frequency() -> u64 {
    DEFAULT_JITTER_FREQUENCY_MS
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelDef {
    #[serde(default)]
    pub text: String,
    /// Frame resource whose first frame is shown instead of text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub style: LabelStyle,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    #[serde(default = "default_jitter_frequency")]
    pub jitter_frequency_ms: u64,
    #[serde(default)]
    pub jitter_offset: i32,
    #[serde(default)]
    pub auto_resize: bool,
}

impl Default for LabelDef {
    fn default() -> Self {
        Self {
            text: String::new(),
            image: None,
            style: LabelStyle::default(),
            decorations: Vec::new(),
            jitter_frequency_ms: DEFAULT_JITTER_FREQUENCY_MS,
            jitter_offset: 0,
            auto_resize: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentDef {
    Frames { resource: String },
    Label(LabelDef),
    /// Auto-sized caption in the see-through float style.
    FloatLabel { text: String },
    Empty,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindowDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: ContentDef,
    pub position: PositionSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ScreenSize>,
    /// Shake from the first time the window is shown.
    #[serde(default)]
    pub shake: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub transparent: bool,
    /// Hang the window from ropes above the screen.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hanging: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<ZoomIn>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Show {
    pub title: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub seed: u64,
    /// Frame resources decoded at startup and kept for fast swaps.
    #[serde(default)]
    pub preload: Vec<String>,
    /// Font file (relative to the asset root) labels are shaped with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    pub windows: Vec<WindowDef>,
    pub timeline: Timeline,
}

impl Show {
    pub fn from_json(s: &str) -> YanzhiResult<Self> {
        let show: Self = serde_json::from_str(s).map_err(|e| YanzhiError::serde(e.to_string()))?;
        show.validate()?;
        Ok(show)
    }

    pub fn from_path(path: &Path) -> YanzhiResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read show file '{}'", path.display()))?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> YanzhiResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| YanzhiError::serde(e.to_string()))
    }

    pub fn window(&self, id: &str) -> Option<&WindowDef> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn validate(&self) -> YanzhiResult<()> {
        if self.duration_ms == 0 {
            return Err(YanzhiError::configuration("show duration must be > 0"));
        }
        let mut ids = HashSet::with_capacity(self.windows.len());
        for w in &self.windows {
            if w.id.is_empty() {
                return Err(YanzhiError::configuration("window id must be non-empty"));
            }
            if !ids.insert(w.id.as_str()) {
                return Err(YanzhiError::configuration(format!(
                    "duplicate window id '{}'",
                    w.id
                )));
            }
            if w.size.is_some_and(ScreenSize::is_empty) {
                return Err(YanzhiError::configuration(format!(
                    "window '{}' has an empty size",
                    w.id
                )));
            }
        }
        self.timeline.check_windows(&ids)?;
        if self.timeline.end_ms() > self.duration_ms {
            tracing::warn!(
                end = self.timeline.end_ms(),
                duration = self.duration_ms,
                "timeline runs past the end of the media"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/model.rs"]
mod tests;
