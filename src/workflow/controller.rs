use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::{RequestSnapshot, WorkflowMsg};
use super::state::{FormEvent, FormState};
use crate::form::{Applied, Field, FieldErrors};
use crate::ingest::{self, ImageAsset, IngestError};
use crate::preview::{self, Preview};
use crate::service::{ComputationResult, ContrastService, NoService, ServiceError};
use crate::throttle::Cooldown;

/// Result of [`WorkflowController::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submit {
    /// Request sent with this token
    Dispatched(u64),
    /// Dropped: a cooldown window is open
    Throttled,
    /// Dropped: fields have errors (strict mode only)
    Blocked(FieldErrors),
    /// Dropped: nothing to compute against yet
    NoImage,
}

/// What one processed completion message did.
#[derive(Debug)]
pub enum Outcome {
    ImageLoaded,
    /// Nothing was selected
    ImageSkipped,
    ImageFailed(IngestError),
    /// Read discarded: another image was selected since
    ImageSuperseded,
    /// Result applied and shown
    Computed(ComputationResult),
    /// Result discarded: inputs changed or a newer request was sent
    Stale { token: u64 },
    /// Service call failed; the form stays usable
    Failed(ServiceError),
}

/// Sole owner and writer of [`FormState`].
///
/// Async work (file reads, service calls) is spawned onto the tokio runtime
/// and reports back over a channel; [`next`](Self::next) applies one
/// completion at a time.
pub struct WorkflowController<S: ContrastService> {
    state: FormState,
    service: Arc<S>,
    cooldown: Cooldown,
    strict: bool,
    tx: mpsc::UnboundedSender<WorkflowMsg>,
    rx: mpsc::UnboundedReceiver<WorkflowMsg>,
    /// Spawned tasks that have not reported back yet.
    pending: usize,
    latest_token: u64,
    latest_read: u64,
}

impl<S: ContrastService> WorkflowController<S> {
    pub fn new(service: Arc<S>, defaults: Applied, cooldown: Cooldown) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: FormState::new(defaults),
            service,
            cooldown,
            strict: true,
            tx,
            rx,
            pending: 0,
            latest_token: 0,
            latest_read: 0,
        }
    }

    /// Whether field errors block submission (default: yes).
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[inline]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[cfg(test)]
    pub fn phase(&self) -> super::Phase {
        self.state.phase
    }

    pub fn preview(&self) -> Preview {
        preview::render(&self.state)
    }

    /// No spawned work is outstanding.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending == 0
    }

    // =========================================================================
    // User input
    // =========================================================================

    /// Start reading an image. `None` (nothing picked) changes nothing.
    ///
    /// Only the newest selection is applied; earlier reads still in flight
    /// are discarded when they finish.
    pub fn select_image(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else {
            return;
        };
        self.latest_read += 1;
        let token = self.latest_read;
        let tx = self.tx.clone();
        self.pending += 1;
        tokio::spawn(async move {
            let read = ingest::load(Some(path.as_path())).await;
            let _ = tx.send(WorkflowMsg::ImageRead { token, read });
        });
    }

    /// Accept an already-read image. Supersedes any read still in flight.
    pub fn accept_image(&mut self, asset: ImageAsset) {
        self.latest_read += 1;
        self.load_asset(asset);
    }

    /// Apply one keystroke-level edit. Invalid values only reach the draft.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.transition(FormEvent::Edited {
            field,
            value: value.into(),
        });
    }

    /// Ask the service for an alpha, through the cooldown.
    pub fn submit(&mut self) -> Submit {
        let (Some(image), Some(snapshot)) =
            (self.state.image.clone(), RequestSnapshot::of(&self.state))
        else {
            return Submit::NoImage;
        };

        if self.strict && !self.state.errors.is_empty() {
            crate::debug!("workflow"; "submit blocked by {} field error(s)", self.state.errors.len());
            return Submit::Blocked(self.state.errors.clone());
        }

        let token = self.latest_token + 1;
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();

        let dispatched = self.cooldown.schedule(move || {
            let request = snapshot.to_request(&image);
            tokio::spawn(async move {
                let msg = match service.request_alpha(request).await {
                    Ok(result) => WorkflowMsg::Computed {
                        token,
                        snapshot,
                        result,
                    },
                    Err(error) => WorkflowMsg::RequestFailed { token, error },
                };
                let _ = tx.send(msg);
            });
        });

        match dispatched {
            Some(()) => {
                self.latest_token = token;
                self.pending += 1;
                crate::debug!("workflow"; "request #{} dispatched", token);
                Submit::Dispatched(token)
            }
            None => Submit::Throttled,
        }
    }

    // =========================================================================
    // Completions
    // =========================================================================

    /// Wait for and apply the next completion. `None` when idle.
    pub async fn next(&mut self) -> Option<Outcome> {
        if self.is_idle() {
            return None;
        }
        let msg = self.rx.recv().await?;
        self.pending -= 1;
        Some(self.handle(msg))
    }

    /// Drain every outstanding completion.
    pub async fn settle(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.next().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    fn handle(&mut self, msg: WorkflowMsg) -> Outcome {
        match msg {
            WorkflowMsg::ImageRead { token, .. } if token != self.latest_read => {
                crate::debug!("workflow"; "discarding superseded image read #{}", token);
                Outcome::ImageSuperseded
            }
            WorkflowMsg::ImageRead { read, .. } => match read {
                Ok(Some(asset)) => {
                    self.load_asset(asset);
                    Outcome::ImageLoaded
                }
                Ok(None) => Outcome::ImageSkipped,
                Err(error) => {
                    crate::log!("ingest"; "{}", error);
                    Outcome::ImageFailed(error)
                }
            },
            WorkflowMsg::Computed {
                token,
                snapshot,
                result,
            } => {
                if !self.is_current(token, &snapshot) {
                    crate::debug!("workflow"; "discarding stale response #{}", token);
                    return Outcome::Stale { token };
                }
                self.transition(FormEvent::Computed(result));
                Outcome::Computed(result)
            }
            WorkflowMsg::RequestFailed { token, error } => {
                crate::log!("service"; "request #{} failed ({}): {}", token, error.kind(), error);
                Outcome::Failed(error)
            }
        }
    }

    /// Latest request, and computed from what the form holds now.
    fn is_current(&self, token: u64, snapshot: &RequestSnapshot) -> bool {
        token == self.latest_token && RequestSnapshot::of(&self.state).as_ref() == Some(snapshot)
    }

    fn load_asset(&mut self, asset: ImageAsset) {
        crate::debug!("workflow"; "image {} ({})", asset.name(), asset.mime());
        self.transition(FormEvent::ImageLoaded(Arc::new(asset)));
    }

    fn transition(&mut self, event: FormEvent) {
        let next = self.state.apply(&event);
        if next.phase != self.state.phase {
            crate::debug!("workflow"; "{} -> {}", self.state.phase.label(), next.phase.label());
        }
        self.state = next;
    }
}

impl WorkflowController<NoService> {
    /// Controller for manual mode: the alpha is typed, never requested.
    pub fn manual(defaults: Applied) -> Self {
        Self::new(Arc::new(NoService), defaults, Cooldown::default())
    }
}
