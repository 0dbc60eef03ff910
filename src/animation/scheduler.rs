//! Fixed-rate frame scheduler.
//!
//! The host loop ticks every [`BASE_TICK_MS`]; the scheduler converts elapsed
//! wall time into logical frames at a target fps and dispatches its callback
//! once per `step` logical frames. Late ticks catch up instead of skipping, so
//! the cumulative callback count only depends on elapsed time.

/// Physical tick rate of the host loop.
pub const BASE_TICK_HZ: u64 = 60;

/// Physical tick period in milliseconds.
pub const BASE_TICK_MS: u64 = 1000 / BASE_TICK_HZ;

/// Logical frame rate assets are authored at.
pub const DEFAULT_FPS: u32 = 30;

/// Callbacks owed by one [`TickScheduler::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dispatch<C> {
    pub callback: C,
    pub count: u32,
}

#[derive(Clone, Debug)]
pub struct TickScheduler<C> {
    fps: u64,
    callback: Option<C>,
    step: u32,
    looping: bool,
    started_at_ms: u64,
    last_frame: u64,
}

impl<C: Copy> TickScheduler<C> {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: u64::from(fps.max(1)),
            callback: None,
            step: 1,
            looping: true,
            started_at_ms: 0,
            last_frame: 0,
        }
    }

    /// Start dispatching `callback` every `step` logical frames.
    ///
    /// While running, the same step is a no-op and a different step is swapped
    /// in place without restarting the elapsed clock.
    pub fn start(&mut self, callback: C, step: u32, looping: bool, now_ms: u64) {
        let step = step.max(1);
        if self.is_running() {
            if step != self.step {
                tracing::trace!(from = self.step, to = step, "scheduler step swapped");
                self.step = step;
            }
            return;
        }
        self.callback = Some(callback);
        self.step = step;
        self.looping = looping;
        self.started_at_ms = now_ms;
        self.last_frame = 0;
    }

    pub fn stop(&mut self) {
        self.callback = None;
    }

    pub fn is_running(&self) -> bool {
        self.callback.is_some()
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn callback(&self) -> Option<C> {
        self.callback
    }

    /// Advance to `now_ms` and report how many callbacks are owed.
    pub fn tick(&mut self, now_ms: u64) -> Option<Dispatch<C>> {
        let callback = self.callback?;
        // floor(elapsed / (1000 / fps)) without float rounding at frame edges.
        let expected = now_ms.saturating_sub(self.started_at_ms) * self.fps / 1000;
        let delta = expected.saturating_sub(self.last_frame);
        let step = u64::from(self.step);
        if delta < step {
            return None;
        }

        let owed = delta / step;
        self.last_frame += owed * step;
        if !self.looping {
            self.callback = None;
            return Some(Dispatch { callback, count: 1 });
        }
        Some(Dispatch {
            callback,
            count: u32::try_from(owed).unwrap_or(u32::MAX),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
