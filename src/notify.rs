//! Desktop notification sink used by `notify` cue commands.

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::error::YanzhiResult;

pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str) -> YanzhiResult<()>;
}

/// Writes notifications to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, title: &str, body: &str) -> YanzhiResult<()> {
        tracing::info!(title, body, "notification");
        Ok(())
    }
}

/// Keeps every notification; clones share the same record.
#[derive(Clone, Debug, Default)]
pub struct MemoryNotifier {
    sent: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.borrow().clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, title: &str, body: &str) -> YanzhiResult<()> {
        self.sent
            .borrow_mut()
            .push((title.to_owned(), body.to_owned()));
        Ok(())
    }
}
