//! Preview rendering.
//!
//! Derives what the overlay looks like from the current form state:
//! text colour, background RGBA (overlay colour + applied alpha), the
//! sanitized overlay markup, and the contrast warning when a visible result
//! misses the target.

mod page;
mod sanitize;

pub use page::render_page;
pub use sanitize::sanitize;

use crate::color::HexColor;
use crate::form::ContrastRatio;
use crate::service::ComputationResult;
use crate::workflow::FormState;

/// Inline style of the overlay element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayStyle {
    pub color: HexColor,
    /// `#RRGGBBAA`
    pub background: String,
}

impl OverlayStyle {
    pub fn css(&self) -> String {
        format!("color:{};background-color:{}", self.color.expand(), self.background)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub style: OverlayStyle,
    /// Sanitized overlay markup.
    pub html: String,
    /// Present only while the result is visible.
    pub result: Option<ComputationResult>,
    pub target: ContrastRatio,
    pub warning: Option<String>,
}

pub fn render(state: &FormState) -> Preview {
    let applied = &state.applied;
    let style = OverlayStyle {
        color: applied.text_colour.clone(),
        background: applied.overlay_colour.to_rgba(applied.alpha),
    };

    let result = state.visible_result().copied();
    let warning = result
        .filter(|r| !r.meets(applied.contrast_ratio))
        .map(|r| contrast_warning(r.contrast, applied.contrast_ratio));

    Preview {
        style,
        html: sanitize(&applied.overlay_text),
        result,
        target: applied.contrast_ratio,
        warning,
    }
}

fn contrast_warning(contrast: f64, target: ContrastRatio) -> String {
    format!(
        "Contrast ratio {contrast:.2} is below the target {target}. \
         Try a darker overlay colour or a different text colour."
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::form::Field;
    use crate::ingest::ImageAsset;
    use crate::workflow::FormEvent;

    fn loaded() -> FormState {
        let asset = Arc::new(ImageAsset::from_bytes("a.png", "image/png", b"png"));
        FormState::default().apply(&FormEvent::ImageLoaded(asset))
    }

    fn edit(state: &FormState, field: Field, value: &str) -> FormState {
        state.apply(&FormEvent::Edited {
            field,
            value: value.to_string(),
        })
    }

    fn computed(alpha: f64, contrast: f64) -> FormEvent {
        let json = format!(r#"{{"alpha": {alpha}, "text_overlay_contrast": {contrast}}}"#);
        FormEvent::Computed(serde_json::from_str(&json).unwrap())
    }

    #[test]
    fn test_default_style() {
        let preview = render(&loaded());
        assert_eq!(preview.style.color.as_str(), "#ffffff");
        assert_eq!(preview.style.background, "#00000080");
        assert_eq!(preview.html, "Overlay text");
        assert!(preview.result.is_none());
    }

    #[test]
    fn test_invalid_colour_keeps_last_good() {
        let state = edit(&loaded(), Field::OverlayColour, "#123456");
        let state = edit(&state, Field::OverlayColour, "#1234");
        assert_eq!(render(&state).style.background, "#12345680");
    }

    #[test]
    fn test_result_background_uses_computed_alpha() {
        let state = edit(&loaded(), Field::OverlayColour, "#123456").apply(&computed(0.42, 5.1));
        let preview = render(&state);
        assert_eq!(preview.style.background, "#1234566c");
        assert!(preview.warning.is_none());
    }

    #[test]
    fn test_warning_below_target() {
        let state = loaded().apply(&computed(0.42, 3.0));
        let preview = render(&state);
        let warning = preview.warning.unwrap();
        assert!(warning.contains("3.00"));
        assert!(warning.contains("4.5"));
    }

    #[test]
    fn test_hidden_result_has_no_warning() {
        let state = loaded().apply(&computed(0.42, 3.0));
        let state = edit(&state, Field::OverlayText, "changed");
        let preview = render(&state);
        assert!(preview.result.is_none());
        assert!(preview.warning.is_none());
    }

    #[test]
    fn test_overlay_text_is_sanitized() {
        let state = edit(&loaded(), Field::OverlayText, "<b>Hi</b><script>x()</script>");
        assert_eq!(render(&state).html, "<b>Hi</b>");
    }

    #[test]
    fn test_css_expands_short_text_colour() {
        let state = edit(&loaded(), Field::TextColour, "#fc0");
        assert_eq!(
            render(&state).style.css(),
            "color:#ffcc00;background-color:#00000080"
        );
    }
}
