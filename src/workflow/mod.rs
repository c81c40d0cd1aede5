//! Workflow controller.
//!
//! Owns the form state and wires the other components together:
//!
//! ```text
//! edit ──▶ validate ──▶ FormState::apply ──▶ preview
//! submit ──▶ Cooldown ──▶ ContrastService ──▶ WorkflowMsg ──▶ FormState::apply
//! ```
//!
//! # Module Structure
//!
//! - `state` - `FormState`, `Phase` and the pure transition function
//! - `messages` - completion messages and request snapshots
//! - `controller` - `WorkflowController` (sole writer of the state)

mod controller;
mod messages;
mod state;


pub use controller::{Outcome, Submit, WorkflowController};
pub use state::FormState;

#[cfg(test)]
pub use state::{FormEvent, Phase};
