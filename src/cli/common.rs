//! Common utilities shared across CLI commands.

use std::path::Path;

use anyhow::{Context, Result};

use crate::form::Field;
use crate::preview::render_page;
use crate::workflow::FormState;

use super::FormArgs;

/// Field edits requested on the command line, in form order.
pub fn form_edits(args: &FormArgs) -> Vec<(Field, &str)> {
    [
        (Field::OverlayText, args.text.as_deref()),
        (Field::OverlayColour, args.overlay.as_deref()),
        (Field::TextColour, args.text_colour.as_deref()),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, v)))
    .collect()
}

/// Render the page for `state` and write it to `path`.
pub async fn write_page(path: &Path, state: &FormState, title: &str) -> Result<()> {
    let html = render_page(state, title);
    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("Failed to write `{}`", path.display()))?;
    crate::debug!("preview"; "wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_form_edits_skips_absent() {
        let args = FormArgs {
            image: PathBuf::from("a.png"),
            text: None,
            overlay: Some("#123".into()),
            text_colour: Some("#fff".into()),
        };
        assert_eq!(
            form_edits(&args),
            [(Field::OverlayColour, "#123"), (Field::TextColour, "#fff")]
        );
    }
}
