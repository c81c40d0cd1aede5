//! Hex colour parsing and RGBA composition.
//!
//! Colours are accepted in `#RGB` or `#RRGGBB` form (case-insensitive) and
//! kept exactly as typed, so the value sent to the contrast service matches
//! what the user entered.
//!
//! ```ignore
//! let c = HexColor::parse("#abc")?;
//! assert_eq!(c.to_rgba(Alpha::OPAQUE), "#aabbccff");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::Alpha;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("`{0}` is not a #RGB or #RRGGBB colour")]
    Format(String),
}

/// A validated `#RGB` / `#RRGGBB` colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let valid = input.strip_prefix('#').is_some_and(|digits| {
            matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
        });
        if valid {
            Ok(Self(input.to_string()))
        } else {
            Err(ColorError::Format(input.to_string()))
        }
    }

    pub fn black() -> Self {
        Self("#000000".to_string())
    }

    pub fn white() -> Self {
        Self("#ffffff".to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `#RGB` form.
    #[inline]
    pub fn is_short(&self) -> bool {
        self.0.len() == 4
    }

    /// Six-digit form. Short colours have every nibble doubled (`#abc` → `#aabbcc`).
    pub fn expand(&self) -> String {
        if !self.is_short() {
            return self.0.clone();
        }
        let mut out = String::with_capacity(7);
        out.push('#');
        for c in self.0[1..].chars() {
            out.push(c);
            out.push(c);
        }
        out
    }

    /// Eight-digit `#RRGGBBAA` string for the overlay background.
    pub fn to_rgba(&self, alpha: Alpha) -> String {
        format!("{}{}", self.expand(), alpha_suffix(alpha))
    }
}

/// Two hex digits for `ceil(alpha * 255)`.
///
/// Ceiling, not nearest: `0.42` gives `6c` (108), not `6b`. Previews must
/// reproduce the web form byte for byte.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn alpha_suffix(alpha: Alpha) -> String {
    let channel = (alpha.get() * 255.0).ceil() as u8;
    format!("{channel:02x}")
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(v: f64) -> Alpha {
        Alpha::new(v).unwrap()
    }

    #[test]
    fn test_parse_accepts_short_and_long() {
        assert!(HexColor::parse("#000").is_ok());
        assert!(HexColor::parse("#000000").is_ok());
        assert!(HexColor::parse("#AbCdEf").is_ok());
        assert!(HexColor::parse("#fFf").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["red", "#12345", "000000", "", "#", "#1234567", "#ggg", "zzzzzz", " #000"] {
            assert!(HexColor::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_parse_keeps_original_case() {
        let c = HexColor::parse("#ABCDEF").unwrap();
        assert_eq!(c.as_str(), "#ABCDEF");
    }

    #[test]
    fn test_expand_short() {
        assert_eq!(HexColor::parse("#abc").unwrap().expand(), "#aabbcc");
        assert_eq!(HexColor::parse("#123456").unwrap().expand(), "#123456");
    }

    #[test]
    fn test_to_rgba_long() {
        let c = HexColor::parse("#123456").unwrap();
        // ceil(0.42 * 255) = 108 = 0x6c
        assert_eq!(c.to_rgba(alpha(0.42)), "#1234566c");
        assert_eq!(c.to_rgba(alpha(0.0)), "#12345600");
        assert_eq!(c.to_rgba(alpha(1.0)), "#123456ff");
    }

    #[test]
    fn test_to_rgba_short_expands_before_suffix() {
        let c = HexColor::parse("#abc").unwrap();
        assert_eq!(c.to_rgba(alpha(0.5)), "#aabbcc80");
    }

    #[test]
    fn test_alpha_suffix_uses_ceiling() {
        // 0.5 * 255 = 127.5 -> 128
        assert_eq!(alpha_suffix(alpha(0.5)), "80");
        // 0.42 * 255 = 107.1 -> 108, nearest would give 107
        assert_eq!(alpha_suffix(alpha(0.42)), "6c");
        // 0.2 * 255 = 51 exactly
        assert_eq!(alpha_suffix(alpha(0.2)), "33");
    }

    #[test]
    fn test_to_rgba_length_and_suffix_property() {
        let colours = ["#000000", "#ffffff", "#A1b2C3", "#0f0f0f"];
        for c in colours {
            let c = HexColor::parse(c).unwrap();
            for step in 0..=100 {
                let a = f64::from(step) / 100.0;
                let rgba = c.to_rgba(alpha(a));
                assert_eq!(rgba.len(), 9);
                let expected = format!("{:02x}", (a * 255.0).ceil() as u8);
                assert_eq!(&rgba[7..], expected);
            }
        }
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let ok: Result<HexColor, _> = serde_json::from_str("\"#fff\"");
        assert!(ok.is_ok());
        let bad: Result<HexColor, _> = serde_json::from_str("\"white\"");
        assert!(bad.is_err());
    }
}
