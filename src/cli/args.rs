//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

/// Find the overlay alpha that keeps text on an image readable
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: rainbow.toml)
    #[arg(short = 'C', long, global = true, default_value = "rainbow.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Ask the contrast service for an alpha and render the preview
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        form: FormArgs,

        /// Target contrast ratio (1 to 21)
        #[arg(short, long)]
        ratio: Option<String>,

        /// Contrast service base URL
        #[arg(short = 'U', long, value_hint = clap::ValueHint::Url)]
        url: Option<Url>,

        /// Minimum milliseconds between two requests
        #[arg(long)]
        cooldown: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render the preview with a hand-picked alpha (no service call)
    #[command(visible_alias = "p")]
    Preview {
        #[command(flatten)]
        form: FormArgs,

        /// Overlay alpha (0 to 1)
        #[arg(short, long)]
        alpha: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the 8-digit RGBA form of a colour
    Rgba {
        /// Colour in #RGB or #RRGGBB form
        colour: String,

        /// Alpha between 0 and 1
        alpha: String,
    },
}

/// Form inputs shared by `check` and `preview`.
///
/// Values are kept as typed; they go through the same per-field validation
/// as interactive edits.
#[derive(clap::Args, Debug, Clone)]
pub struct FormArgs {
    /// Background image
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub image: PathBuf,

    /// Overlay text (simple HTML allowed)
    #[arg(short, long)]
    pub text: Option<String>,

    /// Overlay colour
    #[arg(short, long)]
    pub overlay: Option<String>,

    /// Text colour
    #[arg(short = 'T', long)]
    pub text_colour: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Preview page path (default from config: preview.html)
    #[arg(short = 'O', long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
