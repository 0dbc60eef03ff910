use std::sync::Arc;

use image::RgbaImage;

use crate::animation::jitter::{DEFAULT_JITTER_FREQUENCY_MS, Decoration, JitterAnimator};
use crate::assets::text::{TextEngine, TextStyle};
use crate::foundation::color::{Rgba8, palette};
use crate::foundation::core::ScreenSize;

/// Point size used when a label does not set one.
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Point size of a floating caption.
pub const FLOAT_FONT_SIZE: u32 = 28;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

fn default_letter_spacing() -> i32 {
    -16
}

fn default_fg() -> Rgba8 {
    palette::FG
}

fn default_bg() -> Rgba8 {
    palette::BG
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelStyle {
    #[serde(default)]
    pub font_size: Option<u32>,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default = "default_letter_spacing")]
    pub letter_spacing_px: i32,
    #[serde(default = "default_fg")]
    pub color: Rgba8,
    #[serde(default = "default_bg")]
    pub background: Rgba8,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: None,
            align: TextAlign::default(),
            letter_spacing_px: default_letter_spacing(),
            color: default_fg(),
            background: default_bg(),
        }
    }
}

impl LabelStyle {
    /// Light caption over a see-through background.
    pub fn float() -> Self {
        Self {
            font_size: Some(FLOAT_FONT_SIZE),
            align: TextAlign::Left,
            letter_spacing_px: 0,
            color: palette::FLOAT_FG,
            background: Rgba8::TRANSPARENT,
        }
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font_size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE) as f32,
            letter_spacing: self.letter_spacing_px as f32,
            color: self.color,
        }
    }
}

/// Text or image over a solid background, with jittering decorations.
#[derive(Clone, Debug)]
pub struct DecoratedLabel {
    text: String,
    image: Option<Arc<RgbaImage>>,
    style: LabelStyle,
    jitter: JitterAnimator,
    auto_resize: bool,
}

impl DecoratedLabel {
    pub fn new(text: impl Into<String>, style: LabelStyle, seed: u64) -> Self {
        Self {
            text: text.into(),
            image: None,
            style,
            jitter: JitterAnimator::new(seed),
            auto_resize: false,
        }
    }

    pub fn with_image(mut self, image: Arc<RgbaImage>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_auto_resize(mut self, auto_resize: bool) -> Self {
        self.auto_resize = auto_resize;
        self
    }

    pub fn with_decorations(
        mut self,
        decorations: Vec<Decoration>,
        frequency_ms: u64,
        max_offset: i32,
        now_ms: u64,
    ) -> Self {
        self.jitter
            .set_decorations(decorations, frequency_ms, max_offset, now_ms);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&Arc<RgbaImage>> {
        self.image.as_ref()
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    pub fn auto_resize(&self) -> bool {
        self.auto_resize
    }

    pub fn jitter(&self) -> &JitterAnimator {
        &self.jitter
    }

    /// Returns `false` when the text is already `text`.
    pub fn update_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text.to_owned();
        true
    }

    pub fn set_font_size(&mut self, size: u32) -> bool {
        let changed = self.style.font_size != Some(size);
        self.style.font_size = Some(size);
        changed
    }

    pub fn set_alignment(&mut self, align: TextAlign) -> bool {
        let changed = self.style.align != align;
        self.style.align = align;
        changed
    }

    pub fn set_letter_spacing(&mut self, px: i32) -> bool {
        let changed = self.style.letter_spacing_px != px;
        self.style.letter_spacing_px = px;
        changed
    }

    pub fn set_decorations(
        &mut self,
        decorations: Vec<Decoration>,
        frequency_ms: Option<u64>,
        max_offset: i32,
        now_ms: u64,
    ) -> bool {
        let frequency_ms = frequency_ms.unwrap_or(DEFAULT_JITTER_FREQUENCY_MS);
        self.jitter
            .set_decorations(decorations, frequency_ms, max_offset, now_ms)
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.jitter.tick(now_ms)
    }

    pub fn suspend(&mut self) {
        self.jitter.suspend();
    }

    pub fn resume(&mut self, now_ms: u64) {
        self.jitter.resume(now_ms);
    }

    /// Size the label would take on its own, in reference px: the image size,
    /// or the shaped text. `None` when there is no font to shape with.
    pub fn preferred_size(&self, text: &TextEngine) -> Option<ScreenSize> {
        if let Some(img) = &self.image {
            let (w, h) = img.dimensions();
            return Some(ScreenSize::new(w, h));
        }
        text.measure(&self.text, &self.style.text_style())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/label.rs"]
mod tests;
