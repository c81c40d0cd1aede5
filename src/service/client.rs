use std::time::Duration;

use url::{Host, Url};

use super::{AlphaRequest, ComputationResult, ContrastService, ServiceError};

/// Endpoint path, relative to the configured service URL.
pub const ENDPOINT: &str = ".netlify/functions/rainbow";

/// HTTP client for the contrast service.
#[derive(Debug, Clone)]
pub struct ContrastClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ContrastClient {
    /// `timeout = None` means no local deadline: a request may stay pending
    /// until the service or the network gives up.
    pub fn new(base: &Url, timeout: Option<Duration>) -> Result<Self, ServiceError> {
        let endpoint = as_directory(base)
            .join(ENDPOINT)
            .map_err(|e| ServiceError::Setup(format!("invalid service url `{base}`: {e}")))?;

        let mut builder = reqwest::Client::builder();
        if is_loopback(&endpoint) {
            builder = builder.no_proxy();
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ServiceError::Setup(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `https://host/app` and `https://host/app/` name the same base; without
/// the slash `Url::join` would replace `app` instead of descending into it.
fn as_directory(base: &Url) -> Url {
    let mut base = base.clone();
    if !base.cannot_be_a_base() && !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

/// Local development endpoints bypass any system proxy.
pub(super) fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        Some(Host::Domain(name)) => name.eq_ignore_ascii_case("localhost"),
        None => false,
    }
}

impl ContrastService for ContrastClient {
    async fn request_alpha(
        &self,
        request: AlphaRequest,
    ) -> Result<ComputationResult, ServiceError> {
        crate::debug!("service"; "POST {} (ratio {}, overlay {}, text {})",
            self.endpoint, request.minimum_contrast_ratio, request.overlay_colour, request.text_colour);

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(ServiceError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(ServiceError::from_transport)?;
        let result: ComputationResult =
            serde_json::from_str(&body).map_err(|e| ServiceError::InvalidBody(e.to_string()))?;

        crate::debug!("service"; "alpha {} contrast {}", result.alpha, result.contrast);
        Ok(result)
    }
}
