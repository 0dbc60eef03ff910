use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::animation::timer::PeriodicTimer;
use crate::foundation::color::{Rgba8, palette};
use crate::foundation::core::ScreenPoint;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationShape {
    Circle,
    Rectangle,
    #[default]
    Triangle,
}

fn default_color() -> Rgba8 {
    palette::TETO_RED
}

fn default_size() -> u32 {
    12
}

fn default_stroke() -> u32 {
    2
}

fn default_fill() -> bool {
    true
}

/// A decorative shape drawn over a label, centered on `position` (label-local
/// reference px) and rotated by `rotation` degrees.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Decoration {
    pub position: ScreenPoint,
    #[serde(default)]
    pub shape: DecorationShape,
    #[serde(default = "default_color")]
    pub color: Rgba8,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_stroke")]
    pub width: u32,
    #[serde(default = "default_fill")]
    pub fill: bool,
    #[serde(default)]
    pub rotation: f64,
}

impl Decoration {
    pub fn new(position: ScreenPoint) -> Self {
        Self {
            position,
            shape: DecorationShape::default(),
            color: default_color(),
            size: default_size(),
            width: default_stroke(),
            fill: default_fill(),
            rotation: 0.0,
        }
    }

    pub fn shape(mut self, shape: DecorationShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn outlined(mut self, stroke: u32) -> Self {
        self.fill = false;
        self.width = stroke;
        self
    }
}

/// Default jitter period when a label does not specify one.
pub const DEFAULT_JITTER_FREQUENCY_MS: u64 = 1000;

/// Trembling-ink effect: one random offset per decoration, recomputed on a
/// timer. The offset list always has the same length as the decoration list.
#[derive(Clone, Debug)]
pub struct JitterAnimator {
    decorations: Vec<Decoration>,
    frequency_ms: u64,
    max_offset: i32,
    offsets: Vec<ScreenPoint>,
    timer: PeriodicTimer,
    suspended: bool,
    rng: StdRng,
}

impl JitterAnimator {
    pub fn new(seed: u64) -> Self {
        Self {
            decorations: Vec::new(),
            frequency_ms: DEFAULT_JITTER_FREQUENCY_MS,
            max_offset: 0,
            offsets: Vec::new(),
            timer: PeriodicTimer::new(),
            suspended: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replace the decoration set. Returns `false` (and leaves the timer alone)
    /// when nothing changed.
    pub fn set_decorations(
        &mut self,
        decorations: Vec<Decoration>,
        frequency_ms: u64,
        max_offset: i32,
        now_ms: u64,
    ) -> bool {
        let max_offset = max_offset.max(0);
        if decorations == self.decorations
            && frequency_ms == self.frequency_ms
            && max_offset == self.max_offset
        {
            return false;
        }

        self.decorations = decorations;
        self.frequency_ms = frequency_ms;
        self.max_offset = max_offset;
        self.offsets = vec![ScreenPoint::ORIGIN; self.decorations.len()];

        if self.decorations.is_empty() {
            self.timer.stop();
        } else if !self.suspended {
            self.timer.start(self.frequency_ms, now_ms);
            tracing::trace!(count = self.decorations.len(), "jitter timer restarted");
        }
        true
    }

    /// Returns `true` when offsets were recomputed (a repaint is due).
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.timer.poll(now_ms) {
            return false;
        }
        let m = self.max_offset;
        let rng = &mut self.rng;
        self.offsets = self
            .decorations
            .iter()
            .map(|_| ScreenPoint::new(rng.random_range(-m..=m), rng.random_range(-m..=m)))
            .collect();
        true
    }

    /// Pause while the owning label is hidden.
    pub fn suspend(&mut self) {
        self.suspended = true;
        self.timer.stop();
    }

    pub fn resume(&mut self, now_ms: u64) {
        if !self.suspended {
            return;
        }
        self.suspended = false;
        if !self.decorations.is_empty() {
            self.timer.start(self.frequency_ms, now_ms);
        }
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn offsets(&self) -> &[ScreenPoint] {
        &self.offsets
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_active()
    }

    pub fn timer(&self) -> &PeriodicTimer {
        &self.timer
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/jitter.rs"]
mod tests;
