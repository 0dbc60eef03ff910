use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::animation::timer::PeriodicTimer;
use crate::foundation::core::ScreenPoint;

pub const DEFAULT_SHAKE_OFFSET: i32 = 1;
pub const DEFAULT_SHAKE_INTERVAL_MS: u64 = 33;

/// Whole-window tension shake.
///
/// The animator only produces a delta; the owning window adds it to its
/// anchor position, so repeated shakes never accumulate drift.
#[derive(Clone, Debug)]
pub struct ShakeAnimator {
    offset: i32,
    interval_ms: u64,
    running: bool,
    resume_on_show: bool,
    delta: ScreenPoint,
    timer: PeriodicTimer,
    rng: StdRng,
}

impl ShakeAnimator {
    pub fn new(seed: u64) -> Self {
        Self {
            offset: DEFAULT_SHAKE_OFFSET,
            interval_ms: DEFAULT_SHAKE_INTERVAL_MS,
            running: false,
            resume_on_show: false,
            delta: ScreenPoint::ORIGIN,
            timer: PeriodicTimer::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Start shaking. Re-issuing the running configuration is a no-op; a
    /// different configuration restarts the timer with the new values.
    pub fn start(&mut self, offset: i32, interval_ms: u64, now_ms: u64) -> bool {
        let offset = offset.max(0);
        if self.running && offset == self.offset && interval_ms == self.interval_ms {
            return false;
        }
        self.offset = offset;
        self.interval_ms = interval_ms;
        self.running = true;
        self.resume_on_show = false;
        self.delta = ScreenPoint::ORIGIN;
        self.timer.start(interval_ms, now_ms);
        true
    }

    /// Remember a shake requested while the window is hidden; it starts on the
    /// next [`resume`](Self::resume).
    pub fn defer(&mut self, offset: i32, interval_ms: u64) {
        if self.running {
            self.suspend();
        }
        self.offset = offset.max(0);
        self.interval_ms = interval_ms;
        self.resume_on_show = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.resume_on_show = false;
        self.delta = ScreenPoint::ORIGIN;
        self.timer.stop();
    }

    pub fn suspend(&mut self) {
        if self.running {
            self.stop();
            self.resume_on_show = true;
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        if self.resume_on_show {
            self.resume_on_show = false;
            self.start(self.offset, self.interval_ms, now_ms);
        }
    }

    /// Returns `true` when the delta changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.running || !self.timer.poll(now_ms) {
            return false;
        }
        let m = self.offset;
        self.delta = ScreenPoint::new(
            self.rng.random_range(-m..=m),
            self.rng.random_range(-m..=m),
        );
        true
    }

    pub fn delta(&self) -> ScreenPoint {
        self.delta
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn resumes_on_show(&self) -> bool {
        self.resume_on_show
    }

    pub fn timer(&self) -> &PeriodicTimer {
        &self.timer
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/shake.rs"]
mod tests;
