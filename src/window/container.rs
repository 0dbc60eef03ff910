use crate::animation::ease::Ease;
use crate::animation::motion::{Motion, Segment, Tween};
use crate::animation::shake::ShakeAnimator;
use crate::assets::text::TextEngine;
use crate::content::Content;
use crate::content::cycler::FrameCycler;
use crate::content::label::DecoratedLabel;
use crate::foundation::core::{Point, ScreenPoint, ScreenSize};
use crate::foundation::error::{YanzhiError, YanzhiResult};
use crate::layout::position::PositionSpec;
use crate::layout::scale::ScaleContext;
use crate::window::effects::{
    ZOOM_EASE, ZOOM_FADE_IN_EASE, ZOOM_FADE_OUT_EASE, ZOOM_FROM, ZoomIn, rope_lines,
};

/// Resource name of a window holding its initial content.
pub const DEFAULT_RESOURCE: &str = "default";
/// Resource name of a window whose content was unloaded.
pub const EMPTY_RESOURCE: &str = "empty";

/// Horizontal padding added around an auto-resized label.
pub const LABEL_PADDING: u32 = 32;

pub const FANCY_LEFT_NUDGE: i32 = 40;
pub const FANCY_LEFT_LEG_MS: u64 = 300;

/// A window's on-screen geometry for one frame, in real pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub origin: ScreenPoint,
    pub size: ScreenSize,
    pub opacity: f64,
}

/// A borderless always-on-top window hosting one content widget.
///
/// The size is authored in reference units. The anchor position is resolved
/// against the real screen and kept in screen pixels.
#[derive(Clone, Debug)]
pub struct ContainerWindow {
    id: String,
    title: String,
    spec: PositionSpec,
    size: ScreenSize,
    pos: ScreenPoint,
    scale: ScaleContext,
    visible: bool,
    opacity: f64,
    content: Content,
    resource: String,
    shake: ShakeAnimator,
    motion: Option<Motion>,
    fade: Option<Tween<f64>>,
    leaving: bool,
    transparent: bool,
    hanging: bool,
    zoom: Option<ZoomIn>,
    zoom_tween: Option<Tween<f64>>,
    content_scale: f64,
    fade_out_at: Option<u64>,
}

impl ContainerWindow {
    /// New hidden window of authored `size`, placed on `scale`'s screen.
    pub fn new(
        id: impl Into<String>,
        content: Content,
        spec: PositionSpec,
        size: ScreenSize,
        scale: ScaleContext,
        seed: u64,
    ) -> Self {
        let id = id.into();
        let mut window = Self {
            title: id.clone(),
            id,
            spec,
            size,
            pos: ScreenPoint::ORIGIN,
            scale,
            visible: false,
            opacity: 1.0,
            content,
            resource: DEFAULT_RESOURCE.to_owned(),
            shake: ShakeAnimator::new(seed),
            motion: None,
            fade: None,
            leaving: false,
            transparent: false,
            hanging: false,
            zoom: None,
            zoom_tween: None,
            content_scale: 1.0,
            fade_out_at: None,
        };
        window.content.suspend();
        window.relocate();
        window
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Leave the client area unpainted wherever the content does not draw.
    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Dangle the window from ropes anchored above the screen.
    pub fn with_hanging(mut self, hanging: bool) -> Self {
        self.hanging = hanging;
        self
    }

    pub fn with_zoom(mut self, zoom: Option<ZoomIn>) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn spec(&self) -> &PositionSpec {
        &self.spec
    }

    /// Authored size in reference units.
    pub fn size(&self) -> ScreenSize {
        self.size
    }

    /// Anchor position in screen pixels, excluding shake.
    pub fn position(&self) -> ScreenPoint {
        self.pos
    }

    pub fn scale(&self) -> &ScaleContext {
        &self.scale
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn is_hanging(&self) -> bool {
        self.hanging
    }

    pub fn zoom(&self) -> Option<&ZoomIn> {
        self.zoom.as_ref()
    }

    /// Factor the content is drawn at around the window center; below one
    /// while a zoom entrance is growing.
    pub fn content_scale(&self) -> f64 {
        self.content_scale
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn shake(&self) -> &ShakeAnimator {
        &self.shake
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    pub fn is_leaving(&self) -> bool {
        self.leaving
    }

    pub fn label(&self) -> Option<&DecoratedLabel> {
        match &self.content {
            Content::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn label_mut(&mut self) -> YanzhiResult<&mut DecoratedLabel> {
        match &mut self.content {
            Content::Label(l) => Ok(l),
            other => Err(YanzhiError::configuration(format!(
                "window '{}' holds {} content, not a label",
                self.id,
                other.kind()
            ))),
        }
    }

    pub fn cycler(&self) -> Option<&FrameCycler> {
        match &self.content {
            Content::Frames(c) => Some(c),
            _ => None,
        }
    }

    pub fn cycler_mut(&mut self) -> YanzhiResult<&mut FrameCycler> {
        match &mut self.content {
            Content::Frames(c) => Ok(c),
            other => Err(YanzhiError::configuration(format!(
                "window '{}' holds {} content, not frames",
                self.id,
                other.kind()
            ))),
        }
    }

    /// Swap in `content` under `resource`. Loading the resource already shown
    /// is a no-op and returns `false`.
    pub fn load_widget(&mut self, mut content: Content, resource: &str) -> bool {
        if self.resource == resource {
            return false;
        }
        self.content.cleanup();
        if !self.visible {
            content.suspend();
        }
        let old_resource = std::mem::replace(&mut self.resource, resource.to_owned());
        let old = std::mem::replace(&mut self.content, content);
        if resource == EMPTY_RESOURCE {
            tracing::info!(window = %self.id, old = %old_resource, "unloaded widget");
        } else {
            tracing::info!(window = %self.id, resource, old = %old_resource, "loaded widget");
        }
        drop(old);
        true
    }

    pub fn unload_widget(&mut self) -> bool {
        self.load_widget(Content::Empty, EMPTY_RESOURCE)
    }

    /// Snap the anchor to the resolved position of the current spec. Cancels
    /// any motion in flight.
    pub fn relocate(&mut self) {
        self.motion = None;
        self.leaving = false;
        self.pos = self.scale.place(&self.spec, self.size);
    }

    /// Adopt `spec`. Without `force`, re-issuing the current spec does nothing
    /// and a spec that resolves to the current position keeps any motion in
    /// flight.
    pub fn move_to(&mut self, spec: PositionSpec, force: bool) -> bool {
        if spec == self.spec && !force {
            return false;
        }
        let target = self.scale.place(&spec, self.size);
        self.spec = spec;
        if target == self.pos && !force {
            return false;
        }
        self.relocate();
        true
    }

    /// Animate toward `spec`. Ignored while another movement is in flight or
    /// when the window already sits there.
    pub fn smooth_move_to(
        &mut self,
        spec: PositionSpec,
        duration_ms: u64,
        ease: Ease,
        now_ms: u64,
    ) -> bool {
        if self.motion.is_some() {
            return false;
        }
        let target = self.scale.place(&spec, self.size);
        self.spec = spec;
        if target == self.pos {
            return false;
        }
        self.motion = Some(Motion::single(
            self.pos.to_point(),
            target.to_point(),
            now_ms,
            duration_ms,
            ease,
        ));
        true
    }

    /// Nudge right, then slide off the left edge of the screen. One-shot until
    /// the next [`relocate`](Self::relocate).
    pub fn fancy_left(&mut self, now_ms: u64) -> bool {
        if self.leaving {
            return false;
        }
        self.leaving = true;
        let start = self.pos.to_point();
        let nudge = Point::new(
            start.x + f64::from(self.scale.scale_len(FANCY_LEFT_NUDGE)),
            start.y,
        );
        let off = Point::new(-f64::from(self.scale.scale_size(self.size).width), start.y);
        self.motion = Some(Motion::chain(
            start,
            [
                Segment {
                    to: nudge,
                    duration_ms: FANCY_LEFT_LEG_MS,
                    ease: Ease::OutCubic,
                },
                Segment {
                    to: off,
                    duration_ms: FANCY_LEFT_LEG_MS,
                    ease: Ease::InCubic,
                },
            ],
            now_ms,
        ));
        true
    }

    pub fn fade_to(&mut self, opacity: f64, duration_ms: u64, ease: Ease, now_ms: u64) -> bool {
        let opacity = opacity.clamp(0.0, 1.0);
        let target = self.fade.as_ref().map_or(self.opacity, |f| f.to);
        if (target - opacity).abs() < f64::EPSILON {
            return false;
        }
        self.fade = Some(Tween::new(self.opacity, opacity, now_ms, duration_ms, ease));
        true
    }

    pub fn start_shake(&mut self, offset: i32, interval_ms: u64, now_ms: u64) -> bool {
        if self.visible {
            self.shake.start(offset, interval_ms, now_ms)
        } else {
            self.shake.defer(offset, interval_ms);
            false
        }
    }

    pub fn stop_shake(&mut self) {
        self.shake.stop();
    }

    /// Show the window and resume everything paused by [`hide`](Self::hide).
    pub fn show(&mut self, now_ms: u64) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        self.content.resume(now_ms);
        self.shake.resume(now_ms);
        if let Some(zoom) = self.zoom {
            self.start_zoom(zoom, now_ms);
        }
        tracing::debug!(window = %self.id, "shown");
        true
    }

    fn start_zoom(&mut self, zoom: ZoomIn, now_ms: u64) {
        self.content_scale = ZOOM_FROM;
        self.zoom_tween = Some(Tween::new(
            ZOOM_FROM,
            1.0,
            now_ms,
            zoom.duration_ms,
            ZOOM_EASE,
        ));
        self.opacity = 0.0;
        self.fade = Some(Tween::new(0.0, 1.0, now_ms, zoom.fade_ms, ZOOM_FADE_IN_EASE));
        self.fade_out_at = Some(now_ms + zoom.out_after_ms);
    }

    pub fn hide(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        self.content.suspend();
        self.shake.suspend();
        tracing::debug!(window = %self.id, "hidden");
        true
    }

    /// Set the label text. With resizing on (explicitly or via the label's
    /// auto-resize), the window is refit to the text shaped by `engine` and
    /// relocated; `fixed_size` pins the height and the width still follows
    /// the text.
    pub fn set_text(
        &mut self,
        text: &str,
        resize: Option<bool>,
        fixed_size: Option<ScreenSize>,
        engine: &TextEngine,
    ) -> YanzhiResult<bool> {
        let label = self.label_mut()?;
        if !label.update_text(text) {
            return Ok(false);
        }
        if !resize.unwrap_or(label.auto_resize()) {
            return Ok(true);
        }
        match label.preferred_size(engine) {
            Some(preferred) => {
                let height = fixed_size.map_or(preferred.height, |s| s.height);
                self.size = ScreenSize::new(preferred.width + LABEL_PADDING, height);
                self.relocate();
            }
            None => tracing::warn!(window = %self.id, "no font to measure text; size kept"),
        }
        Ok(true)
    }

    /// Advance motion, fade, shake and content. Returns `true` when anything
    /// visible changed.
    pub fn tick(&mut self, now_ms: u64) -> YanzhiResult<bool> {
        if !self.visible {
            return Ok(false);
        }
        let mut changed = false;

        if let Some(motion) = &mut self.motion {
            let sample = motion.advance(now_ms);
            let pos = ScreenPoint::from_point(sample.position);
            changed |= pos != self.pos;
            self.pos = pos;
            if sample.finished {
                self.motion = None;
            }
        }

        if let Some(tween) = &self.zoom_tween {
            self.content_scale = tween.sample(now_ms);
            changed = true;
            if tween.is_finished(now_ms) {
                self.zoom_tween = None;
            }
        }

        if let Some(at) = self.fade_out_at
            && now_ms >= at
            && let Some(zoom) = self.zoom
        {
            let from = self.fade.as_ref().map_or(self.opacity, |f| f.sample(at));
            self.fade = Some(Tween::new(from, 0.0, at, zoom.fade_ms, ZOOM_FADE_OUT_EASE));
            self.fade_out_at = None;
        }

        if let Some(fade) = &self.fade {
            self.opacity = fade.sample(now_ms);
            changed = true;
            if fade.is_finished(now_ms) {
                self.fade = None;
            }
        }

        changed |= self.shake.tick(now_ms);
        changed |= self.content.tick(now_ms)?;
        Ok(changed)
    }

    pub fn placement(&self) -> Placement {
        Placement {
            origin: self.pos + self.shake.delta(),
            size: self.scale.scale_size(self.size),
            opacity: self.opacity,
        }
    }

    /// Rope segments for a hanging window, in screen pixels.
    pub fn ropes(&self) -> Option<[kurbo::Line; 3]> {
        self.hanging
            .then(|| rope_lines(&self.placement(), &self.scale))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/window/container.rs"]
mod tests;
