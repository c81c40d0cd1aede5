//! `rainbow check`: ask the contrast service for an alpha.
//!
//! ```text
//! image ──► controller ──► edits ──► submit ──► service
//!                                                  │
//!   preview.html ◄── render ◄── reconcile ◄────────┘
//! ```
//!
//! The page is written even when the request fails, showing the last valid
//! values.

use std::sync::Arc;

use anyhow::{Result, bail};

use super::common::{form_edits, write_page};
use super::FormArgs;
use crate::config::RainbowConfig;
use crate::form::Field;
use crate::logger::{status_error, status_success, status_warning};
use crate::service::{ComputationResult, ContrastClient, ContrastService, ServiceError};
use crate::workflow::{Outcome, Submit, WorkflowController};

/// How a check ended.
#[derive(Debug)]
pub enum CheckOutcome {
    Computed(ComputationResult),
    Failed(ServiceError),
}

/// Run a check against the configured service.
pub async fn run_check(
    config: &RainbowConfig,
    form: &FormArgs,
    ratio: Option<&str>,
) -> Result<CheckOutcome> {
    let client = ContrastClient::new(&config.service.url, config.service.timeout())?;
    crate::debug!("service"; "endpoint {}", client.endpoint());
    check_with(Arc::new(client), config, form, ratio).await
}

pub async fn check_with<S: ContrastService>(
    service: Arc<S>,
    config: &RainbowConfig,
    form: &FormArgs,
    ratio: Option<&str>,
) -> Result<CheckOutcome> {
    let mut controller =
        WorkflowController::new(service, config.form_defaults(), config.service.cooldown())
            .with_strict(config.service.strict);

    controller.select_image(Some(form.image.clone()));
    if let Some(Outcome::ImageFailed(err)) = controller.next().await {
        return Err(err.into());
    }

    for (field, value) in form_edits(form) {
        controller.edit(field, value);
    }
    if let Some(ratio) = ratio {
        controller.edit(Field::ContrastRatio, ratio);
    }

    match controller.submit() {
        Submit::Dispatched(token) => crate::debug!("check"; "waiting for request #{}", token),
        Submit::Blocked(errors) => return Err(errors.into()),
        Submit::NoImage => bail!("no image loaded from `{}`", form.image.display()),
        Submit::Throttled => bail!("request throttled, try again shortly"),
    }

    let mut outcome = None;
    for completion in controller.settle().await {
        match completion {
            Outcome::Computed(result) => outcome = Some(CheckOutcome::Computed(result)),
            Outcome::Failed(err) => outcome = Some(CheckOutcome::Failed(err)),
            Outcome::Stale { token } => crate::debug!("check"; "ignored stale response #{}", token),
            _ => {}
        }
    }

    let Some(outcome) = outcome else {
        bail!("the contrast service did not answer");
    };

    write_page(&config.preview.output, controller.state(), &config.preview.title).await?;

    match &outcome {
        CheckOutcome::Computed(result) => {
            let summary = format!(
                "alpha {}, contrast {:.2} → {}",
                result.alpha,
                result.contrast,
                config.preview.output.display()
            );
            match controller.preview().warning {
                None => status_success(&summary),
                Some(warning) => status_warning(&format!("{summary}\n{warning}")),
            }
        }
        CheckOutcome::Failed(err) => {
            status_error(&format!("request failed ({})", err.kind()), &err.to_string());
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::config::test_parse_config;
    use crate::service::mock::{MockService, dead_url};

    fn setup(dir: &Path, service: &url::Url) -> (RainbowConfig, FormArgs) {
        let image = dir.join("banner.png");
        fs::write(&image, b"\x89PNG").unwrap();

        let mut config = test_parse_config("");
        config.service.url = service.clone();
        config.service.timeout_ms = Some(5000);
        config.preview.output = dir.join("preview.html");

        let form = FormArgs {
            image,
            text: Some("Hello <b>world</b><script>x()</script>".into()),
            overlay: Some("#123456".into()),
            text_colour: Some("#ffffff".into()),
        };
        (config, form)
    }

    #[tokio::test]
    async fn test_check_writes_preview() {
        let dir = TempDir::new().unwrap();
        let mock = MockService::start(vec![(200, r#"{"alpha":"0.42","text_overlay_contrast":5.1}"#)]);
        let (config, form) = setup(dir.path(), &mock.url);

        let outcome = run_check(&config, &form, Some("4.5")).await.unwrap();
        assert!(matches!(outcome, CheckOutcome::Computed(r) if r.alpha.get() == 0.42));

        let page = fs::read_to_string(&config.preview.output).unwrap();
        assert!(page.contains("#1234566c"));
        assert!(page.contains("Hello <b>world</b>"));
        assert!(!page.contains("<script>"));

        let bodies = mock.finish();
        assert!(bodies[0].contains(r##""overlay_colour":"#123456""##));
    }

    #[tokio::test]
    async fn test_check_failure_still_writes_page() {
        let dir = TempDir::new().unwrap();
        let (config, form) = setup(dir.path(), &dead_url());

        let outcome = run_check(&config, &form, None).await.unwrap();
        assert!(matches!(outcome, CheckOutcome::Failed(ServiceError::NoResponse(_))));

        let page = fs::read_to_string(&config.preview.output).unwrap();
        assert!(page.contains("#12345680"));
    }

    #[tokio::test]
    async fn test_check_blocked_by_invalid_ratio() {
        let dir = TempDir::new().unwrap();
        let (config, form) = setup(dir.path(), &dead_url());

        let err = run_check(&config, &form, Some("22")).await.unwrap_err();
        assert!(err.to_string().contains("Enter a value in the range 1–21"));
        assert!(!config.preview.output.exists());
    }

    #[tokio::test]
    async fn test_check_missing_image() {
        let dir = TempDir::new().unwrap();
        let (config, mut form) = setup(dir.path(), &dead_url());
        form.image = dir.path().join("missing.png");

        assert!(run_check(&config, &form, None).await.is_err());
    }
}
