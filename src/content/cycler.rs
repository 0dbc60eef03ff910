use std::sync::Arc;

use image::RgbaImage;

use crate::animation::scheduler::{DEFAULT_FPS, TickScheduler};
use crate::assets::frames::FrameSet;
use crate::foundation::error::{YanzhiError, YanzhiResult};

/// Degrees added per step by [`PlaybackPolicy::Rotate`] (one turn per 640 steps).
pub const DEFAULT_ROTATE_STEP_DEG: f64 = 0.5625;

/// What a cycler does on each scheduler step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPolicy {
    /// Next frame, wrapping at the end.
    #[default]
    Advance,
    /// Next entry of the keyframe map; halts when the map runs out.
    Keyframe,
    /// Spin the current frame in place.
    Rotate,
}

/// Frame cursor and playback loop over one [`FrameSet`].
#[derive(Clone, Debug)]
pub struct FrameCycler {
    set: Arc<FrameSet>,
    index: usize,
    keyframe_counter: u64,
    keyframes_exhausted: bool,
    angle: f64,
    rotate_step: f64,
    rotating: bool,
    scheduler: TickScheduler<PlaybackPolicy>,
    suspended: bool,
    resume: Option<(u32, PlaybackPolicy)>,
}

impl FrameCycler {
    pub fn new(set: Arc<FrameSet>) -> Self {
        Self {
            set,
            index: 0,
            keyframe_counter: 0,
            keyframes_exhausted: false,
            angle: 0.0,
            rotate_step: DEFAULT_ROTATE_STEP_DEG,
            rotating: false,
            scheduler: TickScheduler::new(DEFAULT_FPS),
            suspended: false,
            resume: None,
        }
    }

    pub fn frame_set(&self) -> &Arc<FrameSet> {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Accumulated rotation, kept across frame changes until reset.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Rotation the current frame is drawn with: the accumulated angle while
    /// spinning, zero once a plain frame was played.
    pub fn display_angle(&self) -> f64 {
        if self.rotating { self.angle } else { 0.0 }
    }

    pub fn keyframe_counter(&self) -> u64 {
        self.keyframe_counter
    }

    pub fn keyframes_exhausted(&self) -> bool {
        self.keyframes_exhausted
    }

    pub fn set_rotate_step(&mut self, degrees: f64) {
        self.rotate_step = degrees;
    }

    /// The unrotated frame under the cursor.
    pub fn current_image(&self) -> &RgbaImage {
        self.set.frames()[self.index].as_ref()
    }

    /// `None` advances by one (wrapping); `Some(i)` jumps to `i`, where a
    /// negative `i` counts from the end.
    pub fn play_frame(&mut self, index: Option<i64>) -> YanzhiResult<()> {
        let len = self.set.len();
        let target = match index {
            None => (self.index + 1) % len,
            Some(i) => normalize_index(i, len)?,
        };
        if index.is_some() && target == self.index && !self.rotating {
            return Ok(());
        }
        self.index = target;
        self.rotating = false;
        Ok(())
    }

    /// Step the keyframe counter and show its frame. Returns `false` once the
    /// map has no entry for the counter; the loop is stopped at that point.
    pub fn play_keyframe(&mut self) -> YanzhiResult<bool> {
        if self.set.keyframes().is_none() {
            self.scheduler.stop();
            return Err(YanzhiError::configuration(format!(
                "{} has no keyframe map",
                self.set.name()
            )));
        }
        self.keyframe_counter += 1;
        match self.set.keyframe_index(self.keyframe_counter) {
            Some(i) => {
                self.index = i;
                self.rotating = false;
                Ok(true)
            }
            None => {
                self.keyframes_exhausted = true;
                self.scheduler.stop();
                tracing::debug!(resource = self.set.name(), "keyframe track exhausted");
                Ok(false)
            }
        }
    }

    pub fn rotate_frame(&mut self, increment_deg: f64) {
        self.angle = (self.angle + increment_deg) % 360.0;
        self.rotating = true;
    }

    pub fn reset_rotation(&mut self) {
        self.angle = 0.0;
        self.rotating = false;
    }

    /// Start (or retune) the loop. Same step is a no-op, a new step is swapped
    /// in without restarting the clock, and a new policy restarts the loop.
    /// While suspended the request is kept for [`resume`](Self::resume).
    pub fn start_loop(&mut self, step: u32, policy: PlaybackPolicy, now_ms: u64) {
        if policy == PlaybackPolicy::Keyframe && self.keyframes_exhausted {
            return;
        }
        if self.suspended {
            self.resume = Some((step, policy));
            return;
        }
        if self.scheduler.callback().is_some_and(|p| p != policy) {
            self.scheduler.stop();
        }
        self.scheduler.start(policy, step, true, now_ms);
    }

    pub fn stop_loop(&mut self) {
        self.scheduler.stop();
        self.resume = None;
    }

    pub fn is_looping(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Current loop (step, policy), including one parked while suspended.
    pub fn loop_state(&self) -> Option<(u32, PlaybackPolicy)> {
        match self.scheduler.callback() {
            Some(p) => Some((self.scheduler.step(), p)),
            None => self.resume,
        }
    }

    pub fn suspend(&mut self) {
        if self.suspended {
            return;
        }
        self.suspended = true;
        if let Some(policy) = self.scheduler.callback() {
            self.resume = Some((self.scheduler.step(), policy));
            self.scheduler.stop();
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        if !self.suspended {
            return;
        }
        self.suspended = false;
        if let Some((step, policy)) = self.resume.take() {
            self.start_loop(step, policy, now_ms);
        }
    }

    /// Run owed loop steps. Returns `true` when the displayed bitmap changed.
    pub fn tick(&mut self, now_ms: u64) -> YanzhiResult<bool> {
        let Some(d) = self.scheduler.tick(now_ms) else {
            return Ok(false);
        };
        match d.callback {
            PlaybackPolicy::Advance => {
                self.index = (self.index + d.count as usize) % self.set.len();
                self.rotating = false;
            }
            PlaybackPolicy::Keyframe => {
                for _ in 0..d.count {
                    if !self.play_keyframe()? {
                        break;
                    }
                }
            }
            PlaybackPolicy::Rotate => {
                self.rotate_frame(self.rotate_step * f64::from(d.count));
            }
        }
        Ok(true)
    }
}

fn normalize_index(index: i64, len: usize) -> YanzhiResult<usize> {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    if index.unsigned_abs() >= len as u64 {
        return Err(YanzhiError::IndexOutOfRange { index, len });
    }
    let resolved = if index >= 0 { index } else { len_i + index };
    Ok(resolved as usize)
}

#[cfg(test)]
#[path = "../../tests/unit/content/cycler.rs"]
mod tests;
