/// Fixed-interval repeating timer driven by explicit `poll(now_ms)` calls.
///
/// Fires at most once per poll. A late poll does not queue up missed
/// intervals; the next deadline is measured from the poll that fired.
#[derive(Clone, Debug, Default)]
pub struct PeriodicTimer {
    interval_ms: u64,
    next_due_ms: Option<u64>,
    starts: u64,
}

impl PeriodicTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)arm the timer. Always counts as a restart.
    pub fn start(&mut self, interval_ms: u64, now_ms: u64) {
        self.interval_ms = interval_ms.max(1);
        self.next_due_ms = Some(now_ms + self.interval_ms);
        self.starts += 1;
    }

    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Number of times [`start`](Self::start) has been called.
    pub fn starts(&self) -> u64 {
        self.starts
    }

    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_due_ms {
            Some(due) if now_ms >= due => {
                let next = due + self.interval_ms;
                self.next_due_ms = Some(if next > now_ms {
                    next
                } else {
                    now_ms + self.interval_ms
                });
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timer.rs"]
mod tests;
