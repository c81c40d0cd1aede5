//! `[preview]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [preview]
//! title = "Rainbow Contrast Checker"
//! output = "preview.html"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub title: String,
    pub output: PathBuf,
}

impl PreviewConfig {
    pub const OUTPUT: FieldPath = FieldPath::new("preview.output");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error(Self::OUTPUT, "output path is empty");
        } else if self.output.is_dir() {
            diag.error_with_hint(
                Self::OUTPUT,
                format!("`{}` is a directory", self.output.display()),
                "point it at a file such as preview.html",
            );
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            title: "Rainbow Contrast Checker".to_string(),
            output: PathBuf::from("preview.html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::config::test_parse_config;

    use super::*;

    #[test]
    fn test_preview_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.preview.title, "Rainbow Contrast Checker");
        assert_eq!(config.preview.output, PathBuf::from("preview.html"));
    }

    #[test]
    fn test_output_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let config = PreviewConfig {
            output: dir.path().to_path_buf(),
            ..PreviewConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, PreviewConfig::OUTPUT);
    }
}
