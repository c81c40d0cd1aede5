use thiserror::Error;

/// Classified contrast service failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered with a non-2xx status. `body` is kept for diagnostics.
    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no response received: {0}")]
    NoResponse(reqwest::Error),

    #[error("error setting up request: {0}")]
    Setup(String),

    #[error("unreadable response body: {0}")]
    InvalidBody(String),
}

impl ServiceError {
    /// Short label for log prefixes and status lines.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "server error",
            Self::NoResponse(_) => "no response",
            Self::Setup(_) => "request setup",
            Self::InvalidBody(_) => "invalid body",
        }
    }

    pub(super) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Setup(err.to_string())
        } else {
            Self::NoResponse(err)
        }
    }
}
