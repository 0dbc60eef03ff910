use std::collections::HashSet;

use crate::foundation::error::{YanzhiError, YanzhiResult};
use crate::sequence::cue::Cue;

/// Ordered table of disjoint cues. Positions between cues map to nothing.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Cue>", into = "Vec<Cue>")]
pub struct Timeline {
    cues: Vec<Cue>,
}

impl Timeline {
    /// Cues must be sorted by start and must not overlap.
    pub fn new(cues: Vec<Cue>) -> YanzhiResult<Self> {
        for pair in cues.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if b.range.start() < a.range.end() {
                return Err(YanzhiError::configuration(format!(
                    "cue [{}, {}) overlaps or precedes [{}, {})",
                    b.range.start(),
                    b.range.end(),
                    a.range.start(),
                    a.range.end()
                )));
            }
            if b.range.start() > a.range.end() {
                tracing::debug!(
                    from = a.range.end(),
                    to = b.range.start(),
                    "timeline gap"
                );
            }
        }
        Ok(Self { cues })
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// End of the last cue, or 0 for an empty table.
    pub fn end_ms(&self) -> u64 {
        self.cues.last().map_or(0, |c| c.range.end())
    }

    /// The unique cue containing `position_ms`.
    pub fn find(&self, position_ms: u64) -> Option<(usize, &Cue)> {
        let idx = self
            .cues
            .partition_point(|c| c.range.end() <= position_ms);
        let cue = self.cues.get(idx)?;
        cue.range.contains(position_ms).then_some((idx, cue))
    }

    /// Fail on the first window id no cue may refer to.
    pub fn check_windows(&self, known: &HashSet<&str>) -> YanzhiResult<()> {
        for cue in &self.cues {
            if let Some(bad) = cue.window_refs().find(|id| !known.contains(id)) {
                return Err(YanzhiError::configuration(format!(
                    "cue [{}, {}) refers to unknown window '{bad}'",
                    cue.range.start(),
                    cue.range.end()
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Cue>> for Timeline {
    type Error = YanzhiError;

    fn try_from(cues: Vec<Cue>) -> YanzhiResult<Self> {
        Self::new(cues)
    }
}

impl From<Timeline> for Vec<Cue> {
    fn from(t: Timeline) -> Self {
        t.cues
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/timeline.rs"]
mod tests;
