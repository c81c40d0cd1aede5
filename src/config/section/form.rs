//! `[form]` section configuration.
//!
//! Initial values for the five form fields. They pass through the same
//! validation as typed input, so a bad default is reported at startup.
//!
//! # Example
//!
//! ```toml
//! [form]
//! overlay_text = "Summer sale"
//! overlay_colour = "#000000"
//! text_colour = "#ffffff"
//! contrast_ratio = 4.5
//! alpha = 0.5
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::form::{Applied, Draft, Field, FieldErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub overlay_text: String,
    pub overlay_colour: String,
    pub text_colour: String,
    pub contrast_ratio: f64,
    pub alpha: f64,
}

impl FormConfig {
    pub const fn field_path(field: Field) -> FieldPath {
        FieldPath::new(match field {
            Field::OverlayText => "form.overlay_text",
            Field::OverlayColour => "form.overlay_colour",
            Field::TextColour => "form.text_colour",
            Field::ContrastRatio => "form.contrast_ratio",
            Field::Alpha => "form.alpha",
        })
    }

    pub fn draft(&self) -> Draft {
        Draft {
            overlay_text: self.overlay_text.clone(),
            overlay_colour: self.overlay_colour.clone(),
            text_colour: self.text_colour.clone(),
            contrast_ratio: self.contrast_ratio.to_string(),
            alpha: self.alpha.to_string(),
        }
    }

    pub fn applied(&self) -> Result<Applied, FieldErrors> {
        Applied::from_draft(&self.draft())
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(errors) = self.applied() {
            for (field, message) in errors.iter() {
                diag.error(Self::field_path(field), message);
            }
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        let applied = Applied::default();
        Self {
            overlay_text: applied.overlay_text,
            overlay_colour: applied.overlay_colour.into(),
            text_colour: applied.text_colour.into(),
            contrast_ratio: applied.contrast_ratio.get(),
            alpha: applied.alpha.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    use super::*;

    #[test]
    fn test_form_defaults_match_form() {
        let config = test_parse_config("");
        assert_eq!(config.form.applied().unwrap(), Applied::default());
    }

    #[test]
    fn test_form_config() {
        let config = test_parse_config(
            "[form]\noverlay_text = \"Hi\"\noverlay_colour = \"#123\"\ncontrast_ratio = 7\nalpha = 0.25",
        );
        let applied = config.form.applied().unwrap();

        assert_eq!(applied.overlay_text, "Hi");
        assert_eq!(applied.overlay_colour.as_str(), "#123");
        assert_eq!(applied.text_colour.as_str(), "#ffffff");
        assert_eq!(applied.contrast_ratio.get(), 7.0);
        assert_eq!(applied.alpha.get(), 0.25);
    }

    #[test]
    fn test_invalid_defaults_reported_per_field() {
        let config = test_parse_config(
            "[form]\noverlay_colour = \"black\"\ncontrast_ratio = 30\nalpha = 1.5",
        );
        let mut diag = ConfigDiagnostics::new();
        config.form.validate(&mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            ["form.overlay_colour", "form.contrast_ratio", "form.alpha"]
        );
    }

    #[test]
    fn test_boundaries_are_valid() {
        let config = test_parse_config("[form]\ncontrast_ratio = 21\nalpha = 0");
        let mut diag = ConfigDiagnostics::new();
        config.form.validate(&mut diag);
        assert!(diag.is_empty());
    }
}
