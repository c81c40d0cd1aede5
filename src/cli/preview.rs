//! `rainbow preview`: render the page with a hand-picked alpha.
//!
//! Same controller as `check`, built without a service; the alpha is just
//! another field edit.

use anyhow::{Result, bail};

use super::common::{form_edits, write_page};
use super::FormArgs;
use crate::config::RainbowConfig;
use crate::form::Field;
use crate::logger::status_success;
use crate::workflow::{FormState, Outcome, WorkflowController};

pub async fn run_preview(
    config: &RainbowConfig,
    form: &FormArgs,
    alpha: Option<&str>,
) -> Result<FormState> {
    let mut controller = WorkflowController::manual(config.form_defaults());

    controller.select_image(Some(form.image.clone()));
    match controller.next().await {
        Some(Outcome::ImageLoaded) => {}
        Some(Outcome::ImageFailed(err)) => return Err(err.into()),
        _ => bail!("no image loaded from `{}`", form.image.display()),
    }

    let alpha = alpha.map(|a| (Field::Alpha, a));
    for (field, value) in form_edits(form).into_iter().chain(alpha) {
        controller.edit(field, value);
    }

    let state = controller.state();
    if !state.errors.is_empty() {
        return Err(state.errors.clone().into());
    }

    write_page(&config.preview.output, state, &config.preview.title).await?;

    status_success(&format!(
        "overlay {} → {}",
        controller.preview().style.background,
        config.preview.output.display()
    ));
    Ok(state.clone())
}
