use std::collections::VecDeque;

use crate::animation::ease::Ease;
use crate::foundation::core::Point;

pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(self, other: Self, t: f64) -> Self {
        Point::lerp(self, other, t)
    }
}

/// Eased interpolation between two values over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub ease: Ease,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start_ms: u64, duration_ms: u64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            ease,
        }
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms + self.duration_ms
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    pub fn sample(&self, now_ms: u64) -> T {
        if self.duration_ms == 0 || now_ms >= self.end_ms() {
            return self.to;
        }
        let t = now_ms.saturating_sub(self.start_ms) as f64 / self.duration_ms as f64;
        self.from.lerp(self.to, self.ease.apply(t))
    }
}

/// One leg of a chained [`Motion`]; starts where the previous leg ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub to: Point,
    pub duration_ms: u64,
    pub ease: Ease,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    pub position: Point,
    pub finished: bool,
}

/// A sequence of position tweens played back to back.
#[derive(Clone, Debug)]
pub struct Motion {
    current: Tween<Point>,
    queued: VecDeque<Segment>,
}

impl Motion {
    pub fn single(from: Point, to: Point, now_ms: u64, duration_ms: u64, ease: Ease) -> Self {
        Self {
            current: Tween::new(from, to, now_ms, duration_ms, ease),
            queued: VecDeque::new(),
        }
    }

    /// Chain `segments` starting at `from`. An empty chain finishes immediately.
    pub fn chain(from: Point, segments: impl IntoIterator<Item = Segment>, now_ms: u64) -> Self {
        let mut queued: VecDeque<Segment> = segments.into_iter().collect();
        let current = match queued.pop_front() {
            Some(first) => Tween::new(from, first.to, now_ms, first.duration_ms, first.ease),
            None => Tween::new(from, from, now_ms, 0, Ease::Linear),
        };
        Self { current, queued }
    }

    pub fn target(&self) -> Point {
        self.queued.back().map_or(self.current.to, |s| s.to)
    }

    pub fn advance(&mut self, now_ms: u64) -> MotionSample {
        while self.current.is_finished(now_ms) {
            let Some(next) = self.queued.pop_front() else {
                return MotionSample {
                    position: self.current.to,
                    finished: true,
                };
            };
            self.current = Tween::new(
                self.current.to,
                next.to,
                self.current.end_ms(),
                next.duration_ms,
                next.ease,
            );
        }
        MotionSample {
            position: self.current.sample(now_ms),
            finished: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/motion.rs"]
mod tests;
