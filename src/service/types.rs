//! Wire types.
//!
//! Request:
//!
//! ```json
//! { "base64": "...", "minimum_contrast_ratio": 4.5,
//!   "overlay_colour": "#000000", "text_colour": "#ffffff" }
//! ```
//!
//! Response (`alpha` may arrive as a number or a numeric string):
//!
//! ```json
//! { "alpha": "0.42", "text_overlay_contrast": 5.1 }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::HexColor;
use crate::form::{Alpha, ContrastRatio};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlphaRequest {
    pub base64: String,
    pub minimum_contrast_ratio: ContrastRatio,
    pub overlay_colour: HexColor,
    pub text_colour: HexColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ComputationResult {
    #[serde(deserialize_with = "alpha_from_wire")]
    pub alpha: Alpha,
    #[serde(rename = "text_overlay_contrast", deserialize_with = "number_from_wire")]
    pub contrast: f64,
}

impl ComputationResult {
    /// Whether the achieved contrast reaches `target`.
    pub fn meets(&self, target: ContrastRatio) -> bool {
        self.contrast >= target.get()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

fn number_from_wire<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    let value = match NumberOrString::deserialize(de)? {
        NumberOrString::Number(n) => n,
        NumberOrString::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("`{s}` is not a number")))?,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("number is not finite"))
    }
}

fn alpha_from_wire<'de, D: Deserializer<'de>>(de: D) -> Result<Alpha, D::Error> {
    let value = number_from_wire(de)?;
    Alpha::new(value).map_err(serde::de::Error::custom)
}
