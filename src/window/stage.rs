use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::frames::{FrameSet, FrameSource};
use crate::assets::text::TextEngine;
use crate::content::Content;
use crate::content::cycler::FrameCycler;
use crate::content::label::{DecoratedLabel, LabelStyle};
use crate::foundation::error::{YanzhiError, YanzhiResult};
use crate::foundation::math::stable_hash64;
use crate::layout::scale::ScaleContext;
use crate::notify::Notifier;
use crate::sequence::cue::Command;
use crate::show::model::{ContentDef, Show, WindowDef};
use crate::window::container::ContainerWindow;

/// Every window of a show plus the services commands need: the frame source,
/// the preload cache, the text engine, the notifier and the current host time.
pub struct Stage {
    scale: ScaleContext,
    windows: Vec<ContainerWindow>,
    by_id: HashMap<String, usize>,
    source: Box<dyn FrameSource>,
    preloaded: HashMap<String, Arc<FrameSet>>,
    text: TextEngine,
    notifier: Box<dyn Notifier>,
    now_ms: u64,
    seed: u64,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("scale", &self.scale)
            .field("windows", &self.by_id.len())
            .field("preloaded", &self.preloaded.len())
            .field("text", &self.text)
            .field("now_ms", &self.now_ms)
            .finish()
    }
}

impl Stage {
    pub fn new(
        scale: ScaleContext,
        source: Box<dyn FrameSource>,
        notifier: Box<dyn Notifier>,
        seed: u64,
    ) -> Self {
        Self {
            scale,
            windows: Vec::new(),
            by_id: HashMap::new(),
            source,
            preloaded: HashMap::new(),
            text: TextEngine::new(),
            notifier,
            now_ms: 0,
            seed,
        }
    }

    pub fn with_text(mut self, text: TextEngine) -> Self {
        self.text = text;
        self
    }

    /// Load the show's font and resources and build its windows. Any load
    /// failure aborts startup.
    pub fn from_show(
        show: &Show,
        scale: ScaleContext,
        source: Box<dyn FrameSource>,
        notifier: Box<dyn Notifier>,
    ) -> YanzhiResult<Self> {
        let text = match &show.font {
            Some(font) => TextEngine::from_font_bytes(source.load_font(font)?)?,
            None => TextEngine::new(),
        };
        Self::from_show_with_text(show, scale, source, notifier, text)
    }

    /// Like [`from_show`](Self::from_show) with an already loaded text engine.
    /// The show's own font resource is not read.
    #[tracing::instrument(skip_all, fields(show = %show.title))]
    pub fn from_show_with_text(
        show: &Show,
        scale: ScaleContext,
        source: Box<dyn FrameSource>,
        notifier: Box<dyn Notifier>,
        text: TextEngine,
    ) -> YanzhiResult<Self> {
        show.validate()?;
        let mut stage = Self::new(scale, source, notifier, show.seed).with_text(text);
        if !stage.text.has_font() {
            tracing::warn!("no font loaded; label text is neither measured nor drawn");
        }
        for resource in &show.preload {
            stage.preload(resource)?;
        }
        for def in &show.windows {
            stage.add_window(def)?;
        }
        tracing::info!(
            windows = stage.windows.len(),
            preloaded = stage.preloaded.len(),
            "stage ready"
        );
        Ok(stage)
    }

    pub fn add_window(&mut self, def: &WindowDef) -> YanzhiResult<()> {
        if self.by_id.contains_key(&def.id) {
            return Err(YanzhiError::configuration(format!(
                "duplicate window id '{}'",
                def.id
            )));
        }
        let seed = stable_hash64(self.seed, &def.id);
        let content = self.build_content(&def.content, seed)?;
        let size = def
            .size
            .or_else(|| content.preferred_size(&self.text))
            .unwrap_or_default();
        let transparent =
            def.transparent || matches!(def.content, ContentDef::FloatLabel { .. });
        let mut window = ContainerWindow::new(
            def.id.clone(),
            content,
            def.position.clone(),
            size,
            self.scale,
            seed,
        )
        .with_transparent(transparent)
        .with_hanging(def.hanging)
        .with_zoom(def.zoom);
        if let Some(title) = &def.title {
            window = window.with_title(title.clone());
        }
        if def.shake {
            window.start_shake(
                crate::animation::shake::DEFAULT_SHAKE_OFFSET,
                crate::animation::shake::DEFAULT_SHAKE_INTERVAL_MS,
                self.now_ms,
            );
        }
        self.by_id.insert(def.id.clone(), self.windows.len());
        self.windows.push(window);
        Ok(())
    }

    pub fn build_content(&self, def: &ContentDef, seed: u64) -> YanzhiResult<Content> {
        Ok(match def {
            ContentDef::Frames { resource } => {
                Content::Frames(FrameCycler::new(self.frames(resource)?))
            }
            ContentDef::Label(label) => {
                let mut l = DecoratedLabel::new(label.text.clone(), label.style.clone(), seed ^ 1)
                    .with_auto_resize(label.auto_resize)
                    .with_decorations(
                        label.decorations.clone(),
                        label.jitter_frequency_ms,
                        label.jitter_offset,
                        self.now_ms,
                    );
                if let Some(resource) = &label.image {
                    let set = self.frames(resource)?;
                    if let Some(img) = set.frame(0) {
                        l = l.with_image(Arc::clone(img));
                    }
                }
                Content::Label(l)
            }
            ContentDef::FloatLabel { text } => Content::Label(
                DecoratedLabel::new(text.clone(), LabelStyle::float(), seed ^ 1)
                    .with_auto_resize(true),
            ),
            ContentDef::Empty => Content::Empty,
        })
    }

    pub fn scale(&self) -> &ScaleContext {
        &self.scale
    }

    pub fn text(&self) -> &TextEngine {
        &self.text
    }

    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    /// Windows in creation (stacking) order.
    pub fn windows(&self) -> &[ContainerWindow] {
        &self.windows
    }

    pub fn window(&self, id: &str) -> Option<&ContainerWindow> {
        self.by_id.get(id).map(|&i| &self.windows[i])
    }

    pub fn window_mut(&mut self, id: &str) -> YanzhiResult<&mut ContainerWindow> {
        let idx = self.index_of(id)?;
        Ok(&mut self.windows[idx])
    }

    fn index_of(&self, id: &str) -> YanzhiResult<usize> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| YanzhiError::configuration(format!("unknown window '{id}'")))
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.windows
            .iter()
            .filter(|w| w.is_visible())
            .map(ContainerWindow::id)
            .collect()
    }

    pub fn is_preloaded(&self, resource: &str) -> bool {
        self.preloaded.contains_key(resource)
    }

    /// Decode `resource` once and keep it for the lifetime of the stage.
    pub fn preload(&mut self, resource: &str) -> YanzhiResult<Arc<FrameSet>> {
        if let Some(set) = self.preloaded.get(resource) {
            return Ok(Arc::clone(set));
        }
        let set = Arc::new(self.source.load(resource)?);
        self.preloaded.insert(resource.to_owned(), Arc::clone(&set));
        Ok(set)
    }

    /// Preloaded frames when available, otherwise a fresh uncached load.
    pub fn frames(&self, resource: &str) -> YanzhiResult<Arc<FrameSet>> {
        match self.preloaded.get(resource) {
            Some(set) => Ok(Arc::clone(set)),
            None => Ok(Arc::new(self.source.load(resource)?)),
        }
    }

    /// Show exactly the windows in `visible`, hide the rest.
    pub fn apply_visibility(&mut self, visible: &[String]) {
        let now = self.now_ms;
        for w in &mut self.windows {
            if visible.iter().any(|id| id == w.id()) {
                w.show(now);
            } else {
                w.hide();
            }
        }
    }

    /// Run one command against the stage.
    pub fn apply(&mut self, cmd: &Command) -> YanzhiResult<()> {
        let now = self.now_ms;
        match cmd {
            Command::SetText {
                window,
                text,
                resize,
                fixed_size,
            } => {
                let idx = self.index_of(window)?;
                self.windows[idx].set_text(text, *resize, *fixed_size, &self.text)?;
            }
            Command::SetStyle {
                window,
                font_size,
                align,
                letter_spacing_px,
            } => {
                let label = self.window_mut(window)?.label_mut()?;
                if let Some(size) = font_size {
                    label.set_font_size(*size);
                }
                if let Some(align) = align {
                    label.set_alignment(*align);
                }
                if let Some(px) = letter_spacing_px {
                    label.set_letter_spacing(*px);
                }
            }
            Command::SetDecorations {
                window,
                decorations,
                frequency_ms,
                max_offset,
            } => {
                self.window_mut(window)?.label_mut()?.set_decorations(
                    decorations.clone(),
                    *frequency_ms,
                    *max_offset,
                    now,
                );
            }
            Command::Load { window, resource } => {
                if self.window_mut(window)?.resource() == resource.as_str() {
                    return Ok(());
                }
                let content = Content::Frames(FrameCycler::new(self.frames(resource)?));
                self.window_mut(window)?.load_widget(content, resource);
            }
            Command::Unload { window } => {
                self.window_mut(window)?.unload_widget();
            }
            Command::StartLoop {
                window,
                step,
                policy,
            } => {
                self.window_mut(window)?
                    .cycler_mut()?
                    .start_loop(*step, *policy, now);
            }
            Command::StopLoop { window } => {
                self.window_mut(window)?.cycler_mut()?.stop_loop();
            }
            Command::PlayFrame { window, index } => {
                self.window_mut(window)?.cycler_mut()?.play_frame(*index)?;
            }
            Command::ResetRotation { window } => {
                self.window_mut(window)?.cycler_mut()?.reset_rotation();
            }
            Command::StartShake {
                window,
                offset,
                interval_ms,
            } => {
                self.window_mut(window)?
                    .start_shake(*offset, *interval_ms, now);
            }
            Command::StopShake { window } => {
                self.window_mut(window)?.stop_shake();
            }
            Command::MoveTo {
                window,
                position,
                force,
            } => {
                self.window_mut(window)?.move_to(position.clone(), *force);
            }
            Command::SmoothMoveTo {
                window,
                position,
                duration_ms,
                ease,
            } => {
                self.window_mut(window)?
                    .smooth_move_to(position.clone(), *duration_ms, *ease, now);
            }
            Command::FancyLeft { window } => {
                self.window_mut(window)?.fancy_left(now);
            }
            Command::Fade {
                window,
                opacity,
                duration_ms,
                ease,
            } => {
                self.window_mut(window)?
                    .fade_to(*opacity, *duration_ms, *ease, now);
            }
            Command::Preload { resource } => {
                self.preload(resource)?;
            }
            Command::Notify { title, body } => {
                self.notifier.notify(title, body)?;
            }
        }
        Ok(())
    }

    /// Advance every window to `now_ms`. A failing window is logged and the
    /// rest still tick. Returns `true` when a repaint is due.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.now_ms = now_ms;
        let mut changed = false;
        for w in &mut self.windows {
            match w.tick(now_ms) {
                Ok(c) => changed |= c,
                Err(err) => tracing::warn!(window = %w.id(), %err, "window tick failed"),
            }
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/window/stage.rs"]
mod tests;
