//! Configuration management for `rainbow.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── form       # [form]
//! │   ├── preview    # [preview]
//! │   └── service    # [service]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # RainbowConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[service]` | Contrast service URL, cooldown, timeout, strict  |
//! | `[form]`    | Initial field values                             |
//! | `[preview]` | Page title and output path                       |
//!
//! The file is optional: a missing `rainbow.toml` means every default.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{FormConfig, PreviewConfig, ServiceConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config};

use crate::{
    cli::{Cli, Commands},
    form::Applied,
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing rainbow.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RainbowConfig {
    /// Config file the values came from, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Contrast service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Initial form values
    #[serde(default)]
    pub form: FormConfig,

    /// Preview page settings
    #[serde(default)]
    pub preview: PreviewConfig,
}

impl RainbowConfig {
    /// Load configuration for `cli`.
    ///
    /// Searches upward from cwd for the config file, then applies command
    /// line overrides and validates the result.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None => {
                crate::debug!("config"; "{} not found, using defaults", cli.config.display());
                Self::default()
            }
        };

        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Initial form values.
    ///
    /// Falls back to the built-in defaults if `[form]` does not validate;
    /// [`validate`](Self::validate) reports that case at load time.
    pub fn form_defaults(&self) -> Applied {
        self.form.applied().unwrap_or_default()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        match &cli.command {
            Commands::Check {
                url,
                cooldown,
                output,
                ..
            } => {
                Self::update_option(&mut self.service.url, url.as_ref());
                Self::update_option(&mut self.service.cooldown_ms, cooldown.as_ref());
                Self::update_option(&mut self.preview.output, output.output.as_ref());
            }
            Commands::Preview { output, .. } => {
                Self::update_option(&mut self.preview.output, output.output.as_ref());
            }
            Commands::Rgba { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.service.validate(&mut diag);
        self.form.validate(&mut diag);
        self.preview.validate(&mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> RainbowConfig {
    let (parsed, ignored) = RainbowConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
