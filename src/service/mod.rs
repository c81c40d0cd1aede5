//! Contrast service client.
//!
//! The alpha/contrast computation runs remotely. This module owns the wire
//! types, the HTTP client and the failure classification:
//!
//! | Failure                 | Variant                       |
//! |-------------------------|-------------------------------|
//! | non-2xx response        | `ServiceError::Status`        |
//! | network / no response   | `ServiceError::NoResponse`    |
//! | request never built     | `ServiceError::Setup`         |
//! | 2xx with unusable body  | `ServiceError::InvalidBody`   |
//!
//! None of these are fatal to the workflow; the form stays usable.

mod client;
mod error;
mod types;

#[cfg(test)]
pub(crate) mod mock;

use std::future::Future;

pub use client::ContrastClient;
pub use error::ServiceError;
pub use types::{AlphaRequest, ComputationResult};

/// Anything that can answer an alpha request.
///
/// At most one request is outstanding per controller; the cooldown in front
/// of the controller's submit is the enforcement point, not the service.
pub trait ContrastService: Send + Sync + 'static {
    fn request_alpha(
        &self,
        request: AlphaRequest,
    ) -> impl Future<Output = Result<ComputationResult, ServiceError>> + Send;
}

/// Service for manual mode, where the alpha is typed rather than requested.
#[derive(Debug, Default)]
pub struct NoService;

impl ContrastService for NoService {
    async fn request_alpha(
        &self,
        _request: AlphaRequest,
    ) -> Result<ComputationResult, ServiceError> {
        Err(ServiceError::Setup("no contrast service in manual mode".into()))
    }
}
