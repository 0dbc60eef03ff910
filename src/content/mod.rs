//! Content widgets hosted by a container window.

pub mod cycler;
pub mod label;

use crate::assets::text::TextEngine;
use crate::foundation::core::ScreenSize;
use crate::foundation::error::YanzhiResult;

use cycler::FrameCycler;
use label::DecoratedLabel;

/// Exactly one widget per window.
#[derive(Clone, Debug)]
pub enum Content {
    Frames(FrameCycler),
    Label(DecoratedLabel),
    Empty,
}

impl Content {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Frames(_) => "frames",
            Self::Label(_) => "label",
            Self::Empty => "empty",
        }
    }

    pub fn preferred_size(&self, text: &TextEngine) -> Option<ScreenSize> {
        match self {
            Self::Frames(c) => Some(c.frame_set().frame_size()),
            Self::Label(l) => l.preferred_size(text),
            Self::Empty => None,
        }
    }

    /// Returns `true` when the widget needs a repaint.
    pub fn tick(&mut self, now_ms: u64) -> YanzhiResult<bool> {
        match self {
            Self::Frames(c) => c.tick(now_ms),
            Self::Label(l) => Ok(l.tick(now_ms)),
            Self::Empty => Ok(false),
        }
    }

    pub fn suspend(&mut self) {
        match self {
            Self::Frames(c) => c.suspend(),
            Self::Label(l) => l.suspend(),
            Self::Empty => {}
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        match self {
            Self::Frames(c) => c.resume(now_ms),
            Self::Label(l) => l.resume(now_ms),
            Self::Empty => {}
        }
    }

    /// Stop every timer before the widget is dropped.
    pub fn cleanup(&mut self) {
        match self {
            Self::Frames(c) => c.stop_loop(),
            Self::Label(l) => l.suspend(),
            Self::Empty => {}
        }
    }
}
