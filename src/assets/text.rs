use std::borrow::Cow;
use std::cell::RefCell;
use std::cmp::Reverse;
use std::ops::Range;
use std::sync::Arc;

use crate::foundation::color::Rgba8;
use crate::foundation::core::ScreenSize;
use crate::foundation::error::{YanzhiError, YanzhiResult};

/// RGBA8 brush carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Unscaled text style of one label, in reference px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub letter_spacing: f32,
    pub color: Rgba8,
}

/// Label markup reduced to plain text plus per-range font sizes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichText {
    pub text: String,
    /// Byte ranges of `text` with their `font-size`, outermost span first.
    pub sizes: Vec<(Range<usize>, f32)>,
}

/// Parse the rich-text subset labels use: `<br>` breaks the line and
/// `<span style='font-size:Npx;'>` sizes a run. Any other tag is dropped.
pub fn parse_markup(markup: &str) -> RichText {
    let mut out = RichText::default();
    let mut open: Vec<(usize, Option<f32>)> = Vec::new();
    let mut rest = markup;
    while let Some(start) = rest.find('<') {
        out.text.push_str(&rest[..start]);
        let Some(len) = rest[start..].find('>') else {
            out.text.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = rest[start + 1..start + len].trim().to_ascii_lowercase();
        rest = &rest[start + len + 1..];

        if tag == "br" || tag == "br/" || tag == "br /" {
            out.text.push('\n');
        } else if tag.starts_with("/span") {
            if let Some((from, size)) = open.pop()
                && let Some(size) = size
                && from < out.text.len()
            {
                out.sizes.push((from..out.text.len(), size));
            }
        } else if tag.starts_with("span") {
            open.push((out.text.len(), font_size_attr(&tag)));
        }
    }
    out.text.push_str(rest);
    out.sizes
        .sort_by_key(|(range, _)| (range.start, Reverse(range.end)));
    out
}

fn font_size_attr(tag: &str) -> Option<f32> {
    let at = tag.find("font-size")? + "font-size".len();
    let value = tag[at..].trim_start().strip_prefix(':')?.trim_start();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    value[..end].parse().ok().filter(|v: &f32| *v > 0.0)
}

struct Contexts {
    font: parley::FontContext,
    layout: parley::LayoutContext<TextBrush>,
}

/// Shapes label text with the show's font.
///
/// Without a font every layout is `None`: labels keep their authored size and
/// draw no glyphs.
pub struct TextEngine {
    family: Option<String>,
    font_bytes: Option<Arc<Vec<u8>>>,
    contexts: RefCell<Contexts>,
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    pub fn new() -> Self {
        Self {
            family: None,
            font_bytes: None,
            contexts: RefCell::new(Contexts {
                font: parley::FontContext::default(),
                layout: parley::LayoutContext::new(),
            }),
        }
    }

    /// Register `bytes` (TTF/OTF) and shape every label with its first family.
    pub fn from_font_bytes(bytes: Vec<u8>) -> YanzhiResult<Self> {
        let mut engine = Self::new();
        let family = {
            let ctx = engine.contexts.get_mut();
            let families = ctx
                .font
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
            let id = families
                .first()
                .map(|(id, _)| *id)
                .ok_or_else(|| YanzhiError::resource("font data holds no font family"))?;
            ctx.font
                .collection
                .family_name(id)
                .ok_or_else(|| YanzhiError::resource("registered font family has no name"))?
                .to_owned()
        };
        tracing::debug!(family = %family, bytes = bytes.len(), "font registered");
        engine.family = Some(family);
        engine.font_bytes = Some(Arc::new(bytes));
        Ok(engine)
    }

    pub fn has_font(&self) -> bool {
        self.family.is_some()
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub fn font_bytes(&self) -> Option<&Arc<Vec<u8>>> {
        self.font_bytes.as_ref()
    }

    /// Shape `markup` with every size multiplied by `scale`. Lines break only
    /// at explicit newlines.
    pub fn layout(
        &self,
        markup: &str,
        style: &TextStyle,
        scale: f32,
    ) -> Option<parley::Layout<TextBrush>> {
        let family = self.family.as_ref()?;
        let size = style.font_size * scale;
        if !size.is_finite() || size <= 0.0 {
            return None;
        }
        let rich = parse_markup(markup);

        let mut ctx = self.contexts.borrow_mut();
        let Contexts { font, layout } = &mut *ctx;
        let mut builder = layout.ranged_builder(font, &rich.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            style.letter_spacing * scale,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush::from(
            style.color,
        )));
        for (range, px) in &rich.sizes {
            builder.push(
                parley::style::StyleProperty::FontSize(px * scale),
                range.clone(),
            );
        }

        let mut out: parley::Layout<TextBrush> = builder.build(&rich.text);
        out.break_all_lines(None);
        Some(out)
    }

    /// Size of the shaped text in reference px, rounded up.
    pub fn measure(&self, markup: &str, style: &TextStyle) -> Option<ScreenSize> {
        let layout = self.layout(markup, style, 1.0)?;
        let (w, h) = layout_extent(&layout);
        Some(ScreenSize::new(w.ceil() as u32, h.ceil() as u32))
    }
}

/// Widest line advance and summed line heights; never below one pixel.
pub fn layout_extent(layout: &parley::Layout<TextBrush>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w.max(1.0), h.max(1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
