use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{ScreenPoint, ScreenSize};
use crate::foundation::error::{YanzhiError, YanzhiResult};

/// Fraction of the screen height a vertically centered window is centered on.
/// Slightly above the middle so windows do not read as sitting low.
pub const VERTICAL_CENTER_BIAS: f64 = 0.45;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// One axis of a [`PositionSpec`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawAxis", into = "RawAxis")]
pub enum AxisSpec {
    /// Literal coordinate in reference units.
    Absolute(i32),
    /// `"mid"`: centered on the screen (biased upward on the vertical axis).
    Centered,
    /// `"gapL40"` / `"gapR40"`: a gap of `units` reference units from an edge.
    Gap { side: Side, units: u32 },
    /// `"35%"`: the top-left edge sits at this share of the screen extent.
    Percent(u32),
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RawAxis {
    Int(i32),
    Str(String),
}

impl TryFrom<RawAxis> for AxisSpec {
    type Error = YanzhiError;

    fn try_from(raw: RawAxis) -> Result<Self, Self::Error> {
        match raw {
            RawAxis::Int(v) => Ok(Self::Absolute(v)),
            RawAxis::Str(s) => s.parse(),
        }
    }
}

impl From<AxisSpec> for RawAxis {
    fn from(a: AxisSpec) -> Self {
        match a {
            AxisSpec::Absolute(v) => Self::Int(v),
            other => Self::Str(other.to_string()),
        }
    }
}

impl FromStr for AxisSpec {
    type Err = YanzhiError;

    fn from_str(s: &str) -> YanzhiResult<Self> {
        let s = s.trim();
        if s == "mid" || s == "centered" {
            return Ok(Self::Centered);
        }
        if let Ok(v) = s.parse::<i32>() {
            return Ok(Self::Absolute(v));
        }
        if let Some(digits) = s.strip_suffix('%') {
            return match digits.trim().parse::<u32>() {
                Ok(p) if p <= 100 => Ok(Self::Percent(p)),
                _ => Err(invalid_descriptor(s)),
            };
        }
        if let Some(rest) = s.strip_prefix("gap") {
            let (side, digits) = match rest.split_at_checked(1) {
                Some(("L", d)) => (Side::Left, d),
                Some(("R", d)) => (Side::Right, d),
                _ => return Err(invalid_descriptor(s)),
            };
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                let units = digits.parse::<u32>().map_err(|_| invalid_descriptor(s))?;
                return Ok(Self::Gap { side, units });
            }
        }
        Err(invalid_descriptor(s))
    }
}

fn invalid_descriptor(s: &str) -> YanzhiError {
    YanzhiError::configuration(format!(
        "position descriptor '{s}' is neither an integer, 'mid', <N>%, nor gapL<N>/gapR<N>"
    ))
}

impl fmt::Display for AxisSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(v) => write!(f, "{v}"),
            Self::Centered => f.write_str("mid"),
            Self::Gap { side: Side::Left, units } => write!(f, "gapL{units}"),
            Self::Gap { side: Side::Right, units } => write!(f, "gapR{units}"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Symbolic description of where a window sits, resolved against the window
/// size and the screen size at layout time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PositionSpec {
    pub x: AxisSpec,
    pub y: AxisSpec,
}

impl PositionSpec {
    pub fn new(x: AxisSpec, y: AxisSpec) -> Self {
        Self { x, y }
    }

    pub fn at(x: i32, y: i32) -> Self {
        Self::new(AxisSpec::Absolute(x), AxisSpec::Absolute(y))
    }

    pub fn centered() -> Self {
        Self::new(AxisSpec::Centered, AxisSpec::Centered)
    }

    /// Parse both axes from their textual descriptors.
    pub fn parse(x: &str, y: &str) -> YanzhiResult<Self> {
        Ok(Self::new(x.parse()?, y.parse()?))
    }
}

/// Resolve `spec` to an absolute top-left coordinate. Pure: the same inputs
/// always produce the same output.
///
/// `reference` is the resolution gap units are authored against; gaps are
/// scaled by `screen.width / reference.width`.
pub fn resolve_position(
    spec: &PositionSpec,
    window: ScreenSize,
    screen: ScreenSize,
    reference: ScreenSize,
) -> ScreenPoint {
    ScreenPoint::new(
        resolve_horizontal(&spec.x, window, screen, reference),
        resolve_vertical(&spec.y, window, screen),
    )
}

fn resolve_horizontal(
    axis: &AxisSpec,
    window: ScreenSize,
    screen: ScreenSize,
    reference: ScreenSize,
) -> i32 {
    match *axis {
        AxisSpec::Absolute(v) => v,
        AxisSpec::Centered => (screen.width_i32() - window.width_i32()).div_euclid(2),
        AxisSpec::Gap { side, units } => {
            let gap = (f64::from(screen.width) * (f64::from(units) / f64::from(reference.width)))
                as i32;
            match side {
                Side::Left => gap,
                Side::Right => screen.width_i32() - window.width_i32() - gap,
            }
        }
        AxisSpec::Percent(p) => percent_of(screen.width, p),
    }
}

fn resolve_vertical(axis: &AxisSpec, window: ScreenSize, screen: ScreenSize) -> i32 {
    match *axis {
        AxisSpec::Absolute(v) => v,
        // A gap on the vertical axis has no edge to measure from; it centers.
        AxisSpec::Centered | AxisSpec::Gap { .. } => {
            (f64::from(screen.height) * VERTICAL_CENTER_BIAS) as i32
                - window.height_i32().div_euclid(2)
        }
        AxisSpec::Percent(p) => percent_of(screen.height, p),
    }
}

fn percent_of(extent: u32, p: u32) -> i32 {
    (f64::from(extent) * f64::from(p) / 100.0) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/layout/position.rs"]
mod tests;
