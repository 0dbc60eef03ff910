//! One iteration of the host loop: poll the clock, dispatch, tick, present.

use crate::foundation::error::YanzhiResult;
use crate::sequence::clock::{PlaybackClock, PlaybackEvent};
use crate::sequence::director::SequenceDirector;
use crate::window::present::Presenter;
use crate::window::stage::Stage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Exit,
}

/// Owns everything a running show needs.
pub struct Runtime<C> {
    pub stage: Stage,
    pub director: SequenceDirector,
    pub clock: C,
}

impl<C: PlaybackClock> Runtime<C> {
    pub fn new(stage: Stage, director: SequenceDirector, clock: C) -> Self {
        Self {
            stage,
            director,
            clock,
        }
    }

    /// Advance to host time `now_ms`.
    pub fn step(&mut self, now_ms: u64, presenter: &mut dyn Presenter) -> YanzhiResult<StepOutcome> {
        self.stage.set_now(now_ms);
        match self.clock.poll(now_ms) {
            Some(PlaybackEvent::PositionChanged(pos)) => {
                self.director
                    .on_position_changed(pos, &mut self.stage, &mut self.clock);
            }
            Some(PlaybackEvent::EndOfMedia) => {
                tracing::info!(now_ms, "end of media");
                self.director.on_end_of_media(now_ms);
            }
            None => {}
        }
        self.stage.tick(now_ms);
        presenter.present(&self.stage)?;
        if self.director.should_exit(now_ms) {
            return Ok(StepOutcome::Exit);
        }
        Ok(StepOutcome::Continue)
    }
}
