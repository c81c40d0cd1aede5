//! Completion messages from async work back to the controller.
//!
//! ```text
//! select_image --spawn--> ingest::load ----ImageRead----> controller
//! submit ------spawn--> request_alpha --Computed/Failed--> controller
//! ```
//!
//! Reads and requests carry a token, so a late completion can be checked
//! against the newest one before it is applied. Requests also carry a
//! snapshot of their inputs.

use crate::color::HexColor;
use crate::form::ContrastRatio;
use crate::ingest::{ImageAsset, IngestError};
use crate::service::{AlphaRequest, ComputationResult, ServiceError};

use super::FormState;

/// Inputs a request was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSnapshot {
    pub image_id: u64,
    pub overlay_colour: HexColor,
    pub text_colour: HexColor,
    pub contrast_ratio: ContrastRatio,
}

impl RequestSnapshot {
    /// `None` until an image is loaded.
    pub fn of(state: &FormState) -> Option<Self> {
        let image = state.image.as_ref()?;
        Some(Self {
            image_id: image.id(),
            overlay_colour: state.applied.overlay_colour.clone(),
            text_colour: state.applied.text_colour.clone(),
            contrast_ratio: state.applied.contrast_ratio,
        })
    }

    pub fn to_request(&self, image: &ImageAsset) -> AlphaRequest {
        AlphaRequest {
            base64: image.base64().to_string(),
            minimum_contrast_ratio: self.contrast_ratio,
            overlay_colour: self.overlay_colour.clone(),
            text_colour: self.text_colour.clone(),
        }
    }
}

/// Messages to the controller.
#[derive(Debug)]
pub enum WorkflowMsg {
    /// File read finished (`Ok(None)`: nothing was selected)
    ImageRead {
        token: u64,
        read: Result<Option<ImageAsset>, IngestError>,
    },
    /// Service answered
    Computed {
        token: u64,
        snapshot: RequestSnapshot,
        result: ComputationResult,
    },
    /// Service call failed
    RequestFailed { token: u64, error: ServiceError },
}
