use crate::foundation::error::{RaylightError, RaylightResult};

pub use kurbo::{Point, Rect, Vec2};

/// Closed `[min, max]` interval for an oscillating quantity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Value at progress `0`.
    pub min: f64,
    /// Value at progress `1`.
    pub max: f64,
}

impl Bounds {
    /// Validated constructor: both ends finite and `min <= max`.
    pub fn new(min: f64, max: f64) -> RaylightResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RaylightError::validation("Bounds must be finite"));
        }
        if min > max {
            return Err(RaylightError::validation("Bounds min must be <= max"));
        }
        Ok(Self { min, max })
    }

    /// Linear interpolation from `min` (t = 0) to `max` (t = 1).
    pub fn lerp(self, t: f64) -> f64 {
        self.min + (self.max - self.min) * t
    }
}

/// Unit vector of a CSS `linear-gradient` angle in screen space (y grows downward, 0deg points up).
pub fn css_angle_direction(angle_deg: f64) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.sin(), -rad.cos())
}

/// Parse a declared CSS pixel length such as `"36px"` or `"36"`.
///
/// Anything that is not a finite number of pixels (percentages, `calc()`, empty strings) yields
/// `None`. `f64::from_str` accepts `"NaN"` and `"inf"`, so finiteness is checked explicitly.
pub fn parse_px(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let num = s.strip_suffix("px").unwrap_or(s).trim_end();
    let v = num.parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Format a float for CSS output: integral values print without a fraction, everything else is
/// rounded to four decimals with trailing zeros stripped.
pub fn css_number(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut s = format!("{rounded:.4}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
