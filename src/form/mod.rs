//! Overlay form model.
//!
//! The form keeps two views of every field:
//!
//! - [`Draft`]: raw text exactly as typed, possibly invalid
//! - [`Applied`]: last value that validated, used for rendering and requests
//!
//! An edit always updates the draft; it reaches the applied view only when
//! it validates on its own. The preview therefore never renders an invalid
//! colour, and the last good colour stays on screen while the user types.

pub mod validate;
mod values;

use std::collections::BTreeMap;
use std::fmt;

use crate::color::HexColor;

pub use validate::{validate, validate_field};
pub use values::{Alpha, ContrastRatio};

// ============================================================================
// Field
// ============================================================================

/// Editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    OverlayText,
    OverlayColour,
    TextColour,
    ContrastRatio,
    Alpha,
}

impl Field {
    pub const ALL: [Self; 5] = [
        Self::OverlayText,
        Self::OverlayColour,
        Self::TextColour,
        Self::ContrastRatio,
        Self::Alpha,
    ];

    /// Element id used in rendered markup.
    pub const fn id(self) -> &'static str {
        match self {
            Self::OverlayText => "overlay-text",
            Self::OverlayColour => "overlay-colour",
            Self::TextColour => "text-colour",
            Self::ContrastRatio => "contrast-ratio",
            Self::Alpha => "alpha",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OverlayText => "Overlay text",
            Self::OverlayColour => "Overlay colour",
            Self::TextColour => "Text colour",
            Self::ContrastRatio => "Minimum contrast ratio",
            Self::Alpha => "Overlay alpha",
        }
    }

    /// Edits to these fields invalidate a computed alpha.
    pub const fn invalidates_result(self) -> bool {
        matches!(self, Self::OverlayText | Self::OverlayColour)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ============================================================================
// Draft / Applied
// ============================================================================

/// Raw field text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub overlay_text: String,
    pub overlay_colour: String,
    pub text_colour: String,
    pub contrast_ratio: String,
    pub alpha: String,
}

impl Draft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::OverlayText => &self.overlay_text,
            Field::OverlayColour => &self.overlay_colour,
            Field::TextColour => &self.text_colour,
            Field::ContrastRatio => &self.contrast_ratio,
            Field::Alpha => &self.alpha,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::OverlayText => &mut self.overlay_text,
            Field::OverlayColour => &mut self.overlay_colour,
            Field::TextColour => &mut self.text_colour,
            Field::ContrastRatio => &mut self.contrast_ratio,
            Field::Alpha => &mut self.alpha,
        };
        *slot = value;
    }
}

impl From<&Applied> for Draft {
    fn from(applied: &Applied) -> Self {
        Self {
            overlay_text: applied.overlay_text.clone(),
            overlay_colour: applied.overlay_colour.to_string(),
            text_colour: applied.text_colour.to_string(),
            contrast_ratio: applied.contrast_ratio.to_string(),
            alpha: applied.alpha.to_string(),
        }
    }
}

/// Validated field values.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub overlay_text: String,
    pub overlay_colour: HexColor,
    pub text_colour: HexColor,
    pub contrast_ratio: ContrastRatio,
    pub alpha: Alpha,
}

impl Applied {
    /// Promote a whole draft, or report every failing field.
    pub fn from_draft(draft: &Draft) -> Result<Self, FieldErrors> {
        let errors = validate(draft);
        if !errors.is_empty() {
            return Err(errors);
        }
        let mut applied = Self::fallback();
        for field in Field::ALL {
            applied.promote(field, draft.get(field));
        }
        Ok(applied)
    }

    /// Copy `raw` into the applied value if it validates. Returns whether it did.
    pub fn promote(&mut self, field: Field, raw: &str) -> bool {
        match field {
            Field::OverlayText => {
                self.overlay_text = raw.to_string();
                true
            }
            Field::OverlayColour => assign(&mut self.overlay_colour, HexColor::parse(raw).ok()),
            Field::TextColour => assign(&mut self.text_colour, HexColor::parse(raw).ok()),
            Field::ContrastRatio => assign(&mut self.contrast_ratio, ContrastRatio::parse(raw)),
            Field::Alpha => assign(&mut self.alpha, Alpha::parse(raw)),
        }
    }

    /// Values used before any configuration is applied.
    fn fallback() -> Self {
        Self {
            overlay_text: "Overlay text".to_string(),
            overlay_colour: HexColor::black(),
            text_colour: HexColor::white(),
            contrast_ratio: ContrastRatio::AA,
            alpha: Alpha::HALF,
        }
    }
}

impl Default for Applied {
    fn default() -> Self {
        Self::fallback()
    }
}

fn assign<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

// ============================================================================
// FieldErrors
// ============================================================================

/// Field → message. Absent field means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, message: Option<&'static str>) {
        match message {
            Some(m) => {
                self.0.insert(field, m);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", field.label(), message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
