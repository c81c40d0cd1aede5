//! Range-checked numeric form values.
//!
//! Both ranges are inclusive: `0.0` and `1.0` are valid alphas, `1.0` and
//! `21.0` valid contrast targets. Non-finite input is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{value} is outside {min}..={max}")]
pub struct RangeError {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

fn check(value: f64, min: f64, max: f64) -> Result<f64, RangeError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(RangeError { value, min, max })
    }
}

/// Parse a numeric input field, tolerating surrounding whitespace.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

// ============================================================================
// Alpha
// ============================================================================

/// Overlay opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Alpha(f64);

impl Alpha {
    pub const TRANSPARENT: Self = Self(0.0);
    pub const HALF: Self = Self(0.5);
    pub const OPAQUE: Self = Self(1.0);

    pub fn new(value: f64) -> Result<Self, RangeError> {
        check(value, 0.0, 1.0).map(Self)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        parse_number(raw).and_then(|v| Self::new(v).ok())
    }

    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Alpha {
    type Error = RangeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Alpha> for f64 {
    fn from(value: Alpha) -> Self {
        value.0
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// ContrastRatio
// ============================================================================

/// WCAG contrast ratio in `[1, 21]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ContrastRatio(f64);

impl ContrastRatio {
    pub const MIN: Self = Self(1.0);
    pub const MAX: Self = Self(21.0);
    /// WCAG AA for body text.
    pub const AA: Self = Self(4.5);

    pub fn new(value: f64) -> Result<Self, RangeError> {
        check(value, Self::MIN.0, Self::MAX.0).map(Self)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        parse_number(raw).and_then(|v| Self::new(v).ok())
    }

    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ContrastRatio {
    type Error = RangeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContrastRatio> for f64 {
    fn from(value: ContrastRatio) -> Self {
        value.0
    }
}

impl fmt::Display for ContrastRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_bounds_inclusive() {
        assert!(Alpha::new(0.0).is_ok());
        assert!(Alpha::new(1.0).is_ok());
        assert!(Alpha::new(-0.01).is_err());
        assert!(Alpha::new(1.01).is_err());
        assert!(Alpha::new(f64::NAN).is_err());
    }

    #[test]
    fn test_ratio_bounds_inclusive() {
        assert!(ContrastRatio::new(1.0).is_ok());
        assert!(ContrastRatio::new(21.0).is_ok());
        assert!(ContrastRatio::new(0.99).is_err());
        assert!(ContrastRatio::new(21.5).is_err());
        assert!(ContrastRatio::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_trims_and_rejects_text() {
        assert_eq!(ContrastRatio::parse(" 4.5 ").map(ContrastRatio::get), Some(4.5));
        assert_eq!(Alpha::parse("0.25").map(Alpha::get), Some(0.25));
        assert!(Alpha::parse("half").is_none());
        assert!(Alpha::parse("").is_none());
        assert!(ContrastRatio::parse("inf").is_none());
    }

    #[test]
    fn test_range_error_display() {
        let err = Alpha::new(2.0).unwrap_err();
        assert_eq!(err.to_string(), "2 is outside 0..=1");
    }
}
