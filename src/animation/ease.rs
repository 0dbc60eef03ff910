//! Timing curves for tweens, moves and fades.

/// Maps linear progress in `[0, 1]` onto eased progress.
///
/// `In*` curves start slow and `Out*` curves settle slowly; the number names
/// the polynomial degree. Window moves settle with [`Ease::OutCubic`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InCubic,
    #[default]
    OutCubic,
}

impl Ease {
    fn degree(self) -> i32 {
        match self {
            Self::Linear => 1,
            Self::InQuad | Self::OutQuad => 2,
            Self::InCubic | Self::OutCubic => 3,
        }
    }

    fn settles(self) -> bool {
        matches!(self, Self::OutQuad | Self::OutCubic)
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if self.settles() {
            1.0 - (1.0 - t).powi(self.degree())
        } else {
            t.powi(self.degree())
        }
    }

    /// The same curve played backwards in time.
    pub const fn reversed(self) -> Self {
        match self {
            Self::Linear => Self::Linear,
            Self::InQuad => Self::OutQuad,
            Self::OutQuad => Self::InQuad,
            Self::InCubic => Self::OutCubic,
            Self::OutCubic => Self::InCubic,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
