use crate::config::DebugConfig;
use crate::foundation::error::YanzhiError;
use crate::sequence::clock::PlaybackClock;
use crate::sequence::timeline::Timeline;
use crate::window::stage::Stage;

/// Delay between end of media (or the debug stop point) and process exit.
pub const EXIT_GRACE_MS: u64 = 2000;

/// Maps playback position onto the stage through the cue table.
///
/// Dispatch is memoryless: every position update re-applies the containing
/// cue's visible set and commands, so seeking anywhere yields the same stage
/// as playing up to that point (bar one-shot commands and loop phase).
#[derive(Clone, Debug)]
pub struct SequenceDirector {
    timeline: Timeline,
    config: DebugConfig,
    current: Option<usize>,
    exit_at_ms: Option<u64>,
    seeked: bool,
    dispatches: u64,
}

impl SequenceDirector {
    pub fn new(timeline: Timeline, config: DebugConfig) -> Self {
        Self {
            timeline,
            config,
            current: None,
            exit_at_ms: None,
            seeked: false,
            dispatches: 0,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Index of the cue applied by the last dispatch.
    pub fn current_cue(&self) -> Option<usize> {
        self.current
    }

    pub fn dispatches(&self) -> u64 {
        self.dispatches
    }

    pub fn exit_at(&self) -> Option<u64> {
        self.exit_at_ms
    }

    /// Handle one position report, honoring the debug start and stop points.
    #[tracing::instrument(level = "trace", skip(self, stage, clock))]
    pub fn on_position_changed(
        &mut self,
        position_ms: u64,
        stage: &mut Stage,
        clock: &mut dyn PlaybackClock,
    ) -> Option<usize> {
        self.dispatches += 1;
        if self.config.count_ticks {
            tracing::info!(n = self.dispatches, position_ms, "position update");
        }

        let start_from = self.config.start_from_ms;
        if !self.seeked && start_from > 0 && position_ms < start_from {
            self.seeked = true;
            tracing::info!(to = start_from, "seeking to debug start point");
            clock.seek_to(start_from);
            return None;
        }

        let stop_at = self.config.stop_at_ms;
        if stop_at > 0 && position_ms >= stop_at {
            if self.exit_at_ms.is_none() {
                tracing::info!(position_ms, "debug stop point reached");
                clock.stop();
                self.schedule_exit(stage.now());
            }
            return None;
        }

        self.dispatch(position_ms, stage)
    }

    /// Apply the cue containing `position_ms`. Positions in a gap change
    /// nothing. Failing commands are logged and skipped.
    pub fn dispatch(&mut self, position_ms: u64, stage: &mut Stage) -> Option<usize> {
        let Some((idx, cue)) = self.timeline.find(position_ms) else {
            self.current = None;
            return None;
        };
        let entering = self.current != Some(idx);
        if entering {
            tracing::debug!(cue = idx, name = %cue.name, position_ms, "entering cue");
        }

        stage.apply_visibility(&cue.visible);
        for cmd in &cue.commands {
            if cmd.is_one_shot() && !entering {
                continue;
            }
            if let Err(err) = stage.apply(cmd) {
                let err = YanzhiError::dispatch(position_ms, format!("{}: {err}", cmd.name()));
                tracing::warn!(cue = idx, %err, "command failed");
            }
        }
        self.current = Some(idx);
        Some(idx)
    }

    /// Schedule exit [`EXIT_GRACE_MS`] after `now_ms`. Later calls keep the
    /// first deadline.
    pub fn on_end_of_media(&mut self, now_ms: u64) {
        self.schedule_exit(now_ms);
    }

    pub fn should_exit(&self, now_ms: u64) -> bool {
        self.exit_at_ms.is_some_and(|at| now_ms >= at)
    }

    fn schedule_exit(&mut self, now_ms: u64) {
        if self.exit_at_ms.is_none() {
            tracing::info!(exit_at = now_ms + EXIT_GRACE_MS, "exit scheduled");
            self.exit_at_ms = Some(now_ms + EXIT_GRACE_MS);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/director.rs"]
mod tests;
