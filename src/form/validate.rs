//! Per-field input validation.
//!
//! Runs on every draft change, not only on submit. Messages are the inline
//! texts shown under each field.

use super::{Alpha, ContrastRatio, Draft, Field, FieldErrors};
use crate::color::HexColor;

pub const COLOUR_MESSAGE: &str = "Enter colour in #000000 format";
pub const RATIO_MESSAGE: &str = "Enter a value in the range 1–21";
pub const ALPHA_MESSAGE: &str = "Enter a value between zero and one";

/// Validate every field of a draft.
pub fn validate(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in Field::ALL {
        errors.set(field, validate_field(field, draft.get(field)));
    }
    errors
}

/// Validate one raw field value. `None` means valid.
pub fn validate_field(field: Field, raw: &str) -> Option<&'static str> {
    match field {
        Field::OverlayText => None,
        Field::OverlayColour | Field::TextColour => {
            HexColor::parse(raw).is_err().then_some(COLOUR_MESSAGE)
        }
        Field::ContrastRatio => ContrastRatio::parse(raw).is_none().then_some(RATIO_MESSAGE),
        Field::Alpha => Alpha::parse(raw).is_none().then_some(ALPHA_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Applied;

    fn draft() -> Draft {
        Draft::from(&Applied::default())
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&draft()).is_empty());
    }

    #[test]
    fn test_overlay_colour_format() {
        let mut d = draft();
        d.set(Field::OverlayColour, "zzzzzz".into());
        assert_eq!(validate(&d).get(Field::OverlayColour), Some(COLOUR_MESSAGE));

        d.set(Field::OverlayColour, "#000000".into());
        assert_eq!(validate(&d).get(Field::OverlayColour), None);
    }

    #[test]
    fn test_text_colour_format() {
        assert_eq!(validate_field(Field::TextColour, "white"), Some(COLOUR_MESSAGE));
        assert_eq!(validate_field(Field::TextColour, "#fff"), None);
    }

    #[test]
    fn test_ratio_range() {
        assert_eq!(validate_field(Field::ContrastRatio, "0.5"), Some(RATIO_MESSAGE));
        assert_eq!(validate_field(Field::ContrastRatio, "22"), Some(RATIO_MESSAGE));
        assert_eq!(validate_field(Field::ContrastRatio, "abc"), Some(RATIO_MESSAGE));
        assert_eq!(validate_field(Field::ContrastRatio, "7"), None);
    }

    #[test]
    fn test_ratio_boundaries_inclusive() {
        assert_eq!(validate_field(Field::ContrastRatio, "1"), None);
        assert_eq!(validate_field(Field::ContrastRatio, "21"), None);
    }

    #[test]
    fn test_alpha_range() {
        assert_eq!(validate_field(Field::Alpha, "-0.1"), Some(ALPHA_MESSAGE));
        assert_eq!(validate_field(Field::Alpha, "1.5"), Some(ALPHA_MESSAGE));
        assert_eq!(validate_field(Field::Alpha, "0"), None);
        assert_eq!(validate_field(Field::Alpha, "1"), None);
    }

    #[test]
    fn test_overlay_text_never_errors() {
        assert_eq!(validate_field(Field::OverlayText, ""), None);
        assert_eq!(validate_field(Field::OverlayText, "<script>"), None);
    }

    #[test]
    fn test_errors_keyed_by_field() {
        let mut d = draft();
        d.set(Field::TextColour, "#12".into());
        d.set(Field::ContrastRatio, "30".into());
        let errors = validate(&d);
        let fields: Vec<_> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::TextColour, Field::ContrastRatio]);
    }
}
