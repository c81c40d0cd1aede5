//! Command-line interface module.

mod args;
pub mod check;
mod common;
pub mod preview;
pub mod rgba;

pub use args::{Cli, Commands, FormArgs};
