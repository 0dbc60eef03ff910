use crate::foundation::core::{ScreenPoint, ScreenSize};
use crate::foundation::error::{YanzhiError, YanzhiResult};
use crate::layout::position::{AxisSpec, PositionSpec, resolve_position};

/// Vertical compensation (reference px) subtracted before scaling so authored
/// positions line up with the title-bar-less frameless windows.
pub const TITLE_BAR_COMPENSATION: i32 = 16;

/// Display scale for the primary screen, computed once at startup and handed to
/// every component that converts authored coordinates into real pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleContext {
    screen: ScreenSize,
    reference: ScreenSize,
    factor: f64,
}

impl ScaleContext {
    /// Build a context for `screen` against the 1920×1080 reference.
    pub fn new(screen: ScreenSize) -> YanzhiResult<Self> {
        Self::with_reference(screen, ScreenSize::REFERENCE)
    }

    pub fn with_reference(screen: ScreenSize, reference: ScreenSize) -> YanzhiResult<Self> {
        if screen.is_empty() {
            return Err(YanzhiError::configuration("screen size must be non-zero"));
        }
        if reference.is_empty() {
            return Err(YanzhiError::configuration("reference size must be non-zero"));
        }
        Ok(Self {
            screen,
            reference,
            factor: compute_scale(screen, reference),
        })
    }

    /// A context whose screen is exactly the reference resolution.
    pub fn identity() -> Self {
        Self {
            screen: ScreenSize::REFERENCE,
            reference: ScreenSize::REFERENCE,
            factor: 1.0,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn reference(&self) -> ScreenSize {
        self.reference
    }

    /// Map an authored top-left position to screen pixels. Truncates toward
    /// zero like the authored tables expect.
    pub fn scale_position(&self, p: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            (f64::from(p.x) * self.factor) as i32,
            (f64::from(p.y - TITLE_BAR_COMPENSATION) * self.factor) as i32,
        )
    }

    pub fn scale_size(&self, s: ScreenSize) -> ScreenSize {
        ScreenSize::new(
            (f64::from(s.width) * self.factor) as u32,
            (f64::from(s.height) * self.factor) as u32,
        )
    }

    pub fn scale_len(&self, v: i32) -> i32 {
        (f64::from(v) * self.factor) as i32
    }

    /// Top-left screen pixel of a window of authored `size` placed by `spec`.
    ///
    /// Literal axes are authored coordinates and go through the factor;
    /// centered, gap and percent axes are measured on the real screen against
    /// the scaled window, so they stay centered or edge-aligned on any aspect
    /// ratio.
    pub fn place(&self, spec: &PositionSpec, size: ScreenSize) -> ScreenPoint {
        let window = self.scale_size(size);
        let resolved = resolve_position(spec, window, self.screen, self.reference);
        let literal = self.scale_position(resolved);
        ScreenPoint::new(
            if matches!(spec.x, AxisSpec::Absolute(_)) {
                literal.x
            } else {
                resolved.x
            },
            if matches!(spec.y, AxisSpec::Absolute(_)) {
                literal.y
            } else {
                resolved.y
            },
        )
    }
}

/// `min(screen.w / reference.w, screen.h / reference.h)`, so content keeps its
/// aspect ratio and always fits the screen.
pub fn compute_scale(screen: ScreenSize, reference: ScreenSize) -> f64 {
    let w = f64::from(screen.width) / f64::from(reference.width);
    let h = f64::from(screen.height) / f64::from(reference.height);
    w.min(h)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/scale.rs"]
mod tests;
