use std::collections::HashMap;

use crate::content::Content;
use crate::foundation::error::YanzhiResult;
use crate::window::container::Placement;
use crate::window::stage::Stage;

/// Host-side sink that puts the stage on screen after each loop iteration.
pub trait Presenter {
    fn present(&mut self, stage: &Stage) -> YanzhiResult<()>;
}

#[derive(Clone, Debug, PartialEq)]
struct Seen {
    visible: bool,
    resource: String,
    text: Option<String>,
    placement: Placement,
}

/// Logs per-window changes between presents instead of drawing.
#[derive(Debug, Default)]
pub struct LogPresenter {
    seen: HashMap<String, Seen>,
    hide_taskbar: bool,
}

impl LogPresenter {
    pub fn new(hide_taskbar: bool) -> Self {
        Self {
            seen: HashMap::new(),
            hide_taskbar,
        }
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, stage: &Stage) -> YanzhiResult<()> {
        for w in stage.windows() {
            let now = Seen {
                visible: w.is_visible(),
                resource: w.resource().to_owned(),
                text: match w.content() {
                    Content::Label(l) => Some(l.text().to_owned()),
                    _ => None,
                },
                placement: w.placement(),
            };
            let prev = self.seen.get(w.id());
            if prev.map(|p| p.visible) != Some(now.visible) {
                tracing::info!(
                    at = stage.now(),
                    window = w.id(),
                    title = w.title(),
                    visible = now.visible,
                    taskbar = !self.hide_taskbar,
                    "visibility"
                );
            }
            if prev.is_some_and(|p| p.resource != now.resource) {
                tracing::info!(at = stage.now(), window = w.id(), resource = %now.resource, "content swapped");
            }
            if now.visible && prev.is_some_and(|p| p.text != now.text) {
                tracing::info!(at = stage.now(), window = w.id(), text = ?now.text, "text changed");
            }
            if prev.is_some_and(|p| p.placement != now.placement) {
                tracing::trace!(
                    window = w.id(),
                    x = now.placement.origin.x,
                    y = now.placement.origin.y,
                    "moved"
                );
            }
            self.seen.insert(w.id().to_owned(), now);
        }
        Ok(())
    }
}
