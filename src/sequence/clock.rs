//! Playback position sources.

/// What the media player reports on one poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    PositionChanged(u64),
    EndOfMedia,
}

pub trait PlaybackClock {
    /// Report the playback state at host time `now_ms`; `None` once stopped.
    fn poll(&mut self, now_ms: u64) -> Option<PlaybackEvent>;
    fn seek_to(&mut self, position_ms: u64);
    fn stop(&mut self);
}

/// Media stand-in whose position is host time since [`start`](Self::start).
#[derive(Clone, Debug)]
pub struct WallClock {
    duration_ms: u64,
    origin_ms: u64,
    offset_ms: u64,
    last_now_ms: u64,
    stopped: bool,
    ended: bool,
}

impl WallClock {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            origin_ms: 0,
            offset_ms: 0,
            last_now_ms: 0,
            stopped: true,
            ended: false,
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        self.origin_ms = now_ms;
        self.offset_ms = 0;
        self.last_now_ms = now_ms;
        self.stopped = false;
        self.ended = false;
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn position(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.origin_ms) + self.offset_ms
    }
}

impl PlaybackClock for WallClock {
    fn poll(&mut self, now_ms: u64) -> Option<PlaybackEvent> {
        if self.stopped {
            return None;
        }
        self.last_now_ms = now_ms;
        let pos = self.position(now_ms);
        if pos >= self.duration_ms {
            if self.ended {
                return None;
            }
            self.ended = true;
            return Some(PlaybackEvent::EndOfMedia);
        }
        Some(PlaybackEvent::PositionChanged(pos))
    }

    fn seek_to(&mut self, position_ms: u64) {
        self.origin_ms = self.last_now_ms;
        self.offset_ms = position_ms;
        self.ended = false;
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

/// Scripted clock for tests: reports whatever position was last set.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    position_ms: u64,
    ended: bool,
    stopped: bool,
    seeks: Vec<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, position_ms: u64) {
        self.position_ms = position_ms;
    }

    pub fn end(&mut self) {
        self.ended = true;
    }

    pub fn position(&self) -> u64 {
        self.position_ms
    }

    pub fn seeks(&self) -> &[u64] {
        &self.seeks
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl PlaybackClock for ManualClock {
    fn poll(&mut self, _now_ms: u64) -> Option<PlaybackEvent> {
        if self.stopped {
            return None;
        }
        if self.ended {
            return Some(PlaybackEvent::EndOfMedia);
        }
        Some(PlaybackEvent::PositionChanged(self.position_ms))
    }

    fn seek_to(&mut self, position_ms: u64) {
        self.seeks.push(position_ms);
        self.position_ms = position_ms;
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/clock.rs"]
mod tests;
