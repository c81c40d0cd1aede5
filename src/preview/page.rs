//! Standalone HTML page for the preview.

use std::fmt::Write;

use super::{Preview, render};
use crate::form::Field;
use crate::utils::html::{escape, escape_attr};
use crate::workflow::FormState;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0 auto;max-width:48rem;padding:1rem}\
.preview{position:relative;margin:0;min-height:16rem;background-size:cover;background-position:center}\
.overlay{position:absolute;inset:auto 0 0 0;padding:1rem;font-size:1.5rem}\
.screen-reader-text{position:absolute;width:1px;height:1px;overflow:hidden;clip:rect(0 0 0 0)}\
.warning{color:#b00020}\
small{display:block;color:#b00020}";

/// Render the whole page: preview, result summary and the form with errors.
pub fn render_page(state: &FormState, title: &str) -> String {
    let preview = render(state);
    let title = escape(title);

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<header><h1>{title}</h1></header>");
    html.push_str("<main>\n");

    if let Some(image) = &state.image {
        let _ = writeln!(
            html,
            "<figure class=\"preview\" style=\"background-image:url('{}')\" aria-label=\"{}\">",
            escape_attr(image.data_url()),
            escape_attr(image.name()),
        );
        let _ = writeln!(
            html,
            "<div class=\"overlay\" style=\"{}\">{}</div>",
            escape_attr(&preview.style.css()),
            preview.html,
        );
        html.push_str("</figure>\n");
        write_result(&mut html, &preview);
        write_form(&mut html, state);
    } else {
        html.push_str("<p>Choose an image to get started.</p>\n");
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn write_result(html: &mut String, preview: &Preview) {
    let Some(result) = preview.result else {
        return;
    };
    html.push_str("<section class=\"result\">\n");
    let _ = writeln!(
        html,
        "<p>Overlay alpha: <strong>{}</strong></p>",
        result.alpha
    );
    let _ = writeln!(
        html,
        "<p>Text/overlay contrast: <strong>{:.2}</strong> (target {})</p>",
        result.contrast, preview.target
    );
    if let Some(warning) = &preview.warning {
        let _ = writeln!(html, "<p class=\"warning\" role=\"alert\">{}</p>", escape(warning));
    }
    html.push_str("</section>\n");
}

fn write_form(html: &mut String, state: &FormState) {
    html.push_str("<form>\n");
    for field in Field::ALL {
        let id = field.id();
        let error = state.errors.get(field);
        let value = state.draft.get(field);

        html.push_str("<div>\n");
        let _ = writeln!(
            html,
            "<label for=\"{id}\" class=\"screen-reader-text\">{}</label>",
            field.label()
        );
        let _ = write!(
            html,
            "<input id=\"{id}\" name=\"{id}\" type=\"{}\" value=\"{}\" placeholder=\"{}\"",
            input_type(field),
            escape_attr(value),
            field.label(),
        );
        if error.is_some() {
            let _ = write!(html, " aria-invalid=\"true\" aria-describedby=\"{id}-error\"");
        }
        html.push_str(">\n");
        if let Some(message) = error {
            let _ = writeln!(html, "<small id=\"{id}-error\">{}</small>", escape(message));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</form>\n");
}

const fn input_type(field: Field) -> &'static str {
    match field {
        Field::ContrastRatio | Field::Alpha => "number",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::form::validate::COLOUR_MESSAGE;
    use crate::ingest::ImageAsset;
    use crate::workflow::FormEvent;

    fn loaded() -> FormState {
        let asset = Arc::new(ImageAsset::from_bytes("cat.png", "image/png", b"png"));
        FormState::default().apply(&FormEvent::ImageLoaded(asset))
    }

    #[test]
    fn test_page_without_image() {
        let page = render_page(&FormState::default(), "Rainbow Contrast Checker");
        assert!(page.contains("<h1>Rainbow Contrast Checker</h1>"));
        assert!(page.contains("Choose an image"));
        assert!(!page.contains("<form>"));
    }

    #[test]
    fn test_page_with_image() {
        let page = render_page(&loaded(), "Rainbow");
        assert!(page.contains("data:image/png;base64,cG5n"));
        assert!(page.contains("background-color:#00000080"));
        assert!(page.contains(">Overlay text</div>"));
        assert!(page.contains("id=\"overlay-colour\""));
    }

    #[test]
    fn test_page_shows_field_errors() {
        let state = loaded().apply(&FormEvent::Edited {
            field: Field::OverlayColour,
            value: "zzzzzz".to_string(),
        });
        let page = render_page(&state, "Rainbow");
        assert!(page.contains("aria-invalid=\"true\" aria-describedby=\"overlay-colour-error\""));
        assert!(page.contains(&format!("<small id=\"overlay-colour-error\">{COLOUR_MESSAGE}</small>")));
        assert!(page.contains("value=\"zzzzzz\""));
    }

    #[test]
    fn test_page_escapes_draft_values() {
        let state = loaded().apply(&FormEvent::Edited {
            field: Field::OverlayText,
            value: "\"><script>x()</script>".to_string(),
        });
        let page = render_page(&state, "Rainbow");
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn test_page_shows_warning() {
        let result = serde_json::from_str(r#"{"alpha": 0.3, "text_overlay_contrast": 3.0}"#).unwrap();
        let state = loaded().apply(&FormEvent::Computed(result));
        let page = render_page(&state, "Rainbow");
        assert!(page.contains("role=\"alert\""));
        assert!(page.contains("below the target 4.5"));
    }
}
