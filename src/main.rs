//! Rainbow - overlay text on an image at a readable contrast.

mod cli;
mod color;
mod config;
mod form;
mod ingest;
mod logger;
mod preview;
mod service;
mod throttle;
mod utils;
mod workflow;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{RainbowConfig, cfg, init_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Commands::Rgba { colour, alpha } = &cli.command {
        println!("{}", cli::rgba::rgba(colour, alpha)?);
        return Ok(());
    }

    init_config(RainbowConfig::load(&cli)?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let config = cfg();
        match &cli.command {
            Commands::Check { form, ratio, .. } => {
                cli::check::run_check(&config, form, ratio.as_deref())
                    .await
                    .map(|_| ())
            }
            Commands::Preview { form, alpha, .. } => {
                cli::preview::run_preview(&config, form, alpha.as_deref())
                    .await
                    .map(|_| ())
            }
            Commands::Rgba { .. } => Ok(()),
        }
    })
}
