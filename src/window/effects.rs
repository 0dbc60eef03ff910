//! Window entrances and attachments beyond plain placement.

use kurbo::{Line, Point};

use crate::animation::ease::Ease;
use crate::layout::scale::ScaleContext;
use crate::window::container::Placement;

/// Content scale a zooming window starts from.
pub const ZOOM_FROM: f64 = 0.5;
pub const ZOOM_EASE: Ease = Ease::OutCubic;
pub const ZOOM_FADE_IN_EASE: Ease = Ease::OutQuad;
pub const ZOOM_FADE_OUT_EASE: Ease = ZOOM_FADE_IN_EASE.reversed();

fn default_zoom_ms() -> u64 {
    4_000
}

fn default_fade_ms() -> u64 {
    1_000
}

fn default_out_after_ms() -> u64 {
    2_000
}

/// Grow-and-fade entrance replayed every time the window is shown.
///
/// The content grows from [`ZOOM_FROM`] to full size over `duration_ms` while
/// the window fades in over `fade_ms`; `out_after_ms` after showing it fades
/// back out over `fade_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ZoomIn {
    #[serde(default = "default_zoom_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
    #[serde(default = "default_out_after_ms")]
    pub out_after_ms: u64,
}

impl Default for ZoomIn {
    fn default() -> Self {
        Self {
            duration_ms: default_zoom_ms(),
            fade_ms: default_fade_ms(),
            out_after_ms: default_out_after_ms(),
        }
    }
}

/// Height (reference px, above the screen top) all ropes hang from.
pub const ROPE_ANCHOR_Y: i32 = -300;
/// Horizontal inset of the outer ropes from the window edges.
pub const ROPE_INSET: i32 = 64;
/// Gap between the rope ends and the window's top edge.
pub const ROPE_LIFT: i32 = 32;
/// Rope stroke width in reference px.
pub const ROPE_WIDTH: f64 = 4.0;

/// The three ropes a hanging window dangles from, in screen pixels.
///
/// They share one anchor above the horizontal middle of the screen and end
/// just above the window: near both top corners and at the top center.
pub fn rope_lines(placement: &Placement, scale: &ScaleContext) -> [Line; 3] {
    let anchor = Point::new(
        f64::from(scale.screen().width / 2),
        f64::from(scale.scale_len(ROPE_ANCHOR_Y)),
    );
    let left = f64::from(placement.origin.x);
    let right = left + f64::from(placement.size.width);
    let top = f64::from(placement.origin.y - scale.scale_len(ROPE_LIFT));
    let inset = f64::from(scale.scale_len(ROPE_INSET));
    [
        Line::new(anchor, (left + inset, top)),
        Line::new(anchor, ((left + right) / 2.0, top)),
        Line::new(anchor, (right - inset, top)),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/window/effects.rs"]
mod tests;
