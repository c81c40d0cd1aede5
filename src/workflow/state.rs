//! Form state and its transitions.
//!
//! ```text
//! NoImage ──image──▶ ImageLoaded ──edit──▶ FormEditing ◀──┐
//!                         │                   │           │ overlay text /
//!                         └──────result───────┴──▶ ResultVisible  overlay colour edit
//! ```
//!
//! `FormState::apply` is pure: it never mutates, it returns the next state.
//! The controller is the only caller and swaps the whole value.

use std::sync::Arc;

use crate::form::{Applied, Draft, Field, FieldErrors, validate, validate_field};
use crate::ingest::ImageAsset;
use crate::service::ComputationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected yet; the form is hidden.
    NoImage,
    /// An image is shown, nothing edited or computed since.
    ImageLoaded,
    /// Inputs changed since the last visible result (or none arrived yet).
    FormEditing,
    /// A computed alpha is shown.
    ResultVisible,
}

impl Phase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoImage => "no image",
            Self::ImageLoaded => "image loaded",
            Self::FormEditing => "editing",
            Self::ResultVisible => "result visible",
        }
    }
}

/// Inputs to [`FormState::apply`].
#[derive(Debug, Clone)]
pub enum FormEvent {
    ImageLoaded(Arc<ImageAsset>),
    Edited { field: Field, value: String },
    Computed(ComputationResult),
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub phase: Phase,
    pub draft: Draft,
    pub applied: Applied,
    pub errors: FieldErrors,
    pub image: Option<Arc<ImageAsset>>,
    /// Last computed result. Kept while hidden; shown only in `ResultVisible`.
    pub result: Option<ComputationResult>,
}

impl FormState {
    pub fn new(defaults: Applied) -> Self {
        let draft = Draft::from(&defaults);
        Self {
            phase: Phase::NoImage,
            errors: validate(&draft),
            draft,
            applied: defaults,
            image: None,
            result: None,
        }
    }

    pub fn apply(&self, event: &FormEvent) -> Self {
        let mut next = self.clone();
        match event {
            FormEvent::ImageLoaded(asset) => {
                next.image = Some(Arc::clone(asset));
                next.phase = match self.phase {
                    Phase::NoImage => Phase::ImageLoaded,
                    // computed for the previous image
                    Phase::ResultVisible => Phase::FormEditing,
                    other => other,
                };
            }
            FormEvent::Edited { field, value } => {
                next.draft.set(*field, value.clone());
                next.applied.promote(*field, value);
                next.errors.set(*field, validate_field(*field, value));
                next.phase = match self.phase {
                    Phase::ImageLoaded => Phase::FormEditing,
                    Phase::ResultVisible if field.invalidates_result() => Phase::FormEditing,
                    other => other,
                };
            }
            FormEvent::Computed(result) => {
                next.result = Some(*result);
                next.applied.alpha = result.alpha;
                next.draft.alpha = result.alpha.to_string();
                next.errors.set(Field::Alpha, None);
                if next.image.is_some() {
                    next.phase = Phase::ResultVisible;
                }
            }
        }
        next
    }

    /// The result, if it is currently shown.
    pub fn visible_result(&self) -> Option<&ComputationResult> {
        match self.phase {
            Phase::ResultVisible => self.result.as_ref(),
            _ => None,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Applied::default())
    }
}
