//! `[service]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [service]
//! url = "http://localhost:8888/"  # Base URL; the function path is appended
//! cooldown_ms = 1000              # Minimum gap between two requests
//! timeout_ms = 30000              # Optional local deadline
//! strict = true                   # Refuse to submit while fields are invalid
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::throttle::{Cooldown, DEFAULT_COOLDOWN_MS};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8888/";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub url: Url,
    pub cooldown_ms: u64,
    /// Absent means no local deadline.
    pub timeout_ms: Option<u64>,
    pub strict: bool,
}

impl ServiceConfig {
    pub const URL: FieldPath = FieldPath::new("service.url");
    pub const COOLDOWN: FieldPath = FieldPath::new("service.cooldown_ms");
    pub const TIMEOUT: FieldPath = FieldPath::new("service.timeout_ms");

    pub fn cooldown(&self) -> Cooldown {
        Cooldown::from_millis(self.cooldown_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !matches!(self.url.scheme(), "http" | "https") {
            diag.error_with_hint(
                Self::URL,
                format!("unsupported scheme `{}`", self.url.scheme()),
                "use an http:// or https:// URL",
            );
        }
        if self.cooldown_ms == 0 {
            diag.warn(Self::COOLDOWN, "0 disables request throttling");
        }
        if self.timeout_ms == Some(0) {
            diag.error_with_hint(
                Self::TIMEOUT,
                "a zero timeout fails every request",
                "remove the field to wait indefinitely",
            );
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_SERVICE_URL).expect("default service URL is valid"),
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            timeout_ms: None,
            strict: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    use super::*;

    #[test]
    fn test_service_config() {
        let config = test_parse_config(
            "[service]\nurl = \"https://contrast.example.com/\"\ncooldown_ms = 250\ntimeout_ms = 5000\nstrict = false",
        );

        assert_eq!(config.service.url.host_str(), Some("contrast.example.com"));
        assert_eq!(config.service.cooldown().window(), Duration::from_millis(250));
        assert_eq!(config.service.timeout(), Some(Duration::from_secs(5)));
        assert!(!config.service.strict);
    }

    #[test]
    fn test_service_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.service.url.as_str(), DEFAULT_SERVICE_URL);
        assert_eq!(config.service.cooldown_ms, 1000);
        assert!(config.service.timeout().is_none());
        assert!(config.service.strict);
    }

    #[test]
    fn test_invalid_url_is_parse_error() {
        let result: Result<crate::config::RainbowConfig, _> =
            toml::from_str("[service]\nurl = \"not a url\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_scheme_and_timeout() {
        let config = test_parse_config("[service]\nurl = \"ftp://example.com/\"\ntimeout_ms = 0");
        let mut diag = ConfigDiagnostics::new();
        config.service.validate(&mut diag);

        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[0].field, ServiceConfig::URL);
        assert_eq!(diag.errors()[1].field, ServiceConfig::TIMEOUT);
    }

    #[test]
    fn test_zero_cooldown_warns() {
        let config = test_parse_config("[service]\ncooldown_ms = 0");
        let mut diag = ConfigDiagnostics::new();
        config.service.validate(&mut diag);

        assert!(diag.is_empty());
        assert_eq!(diag.warnings()[0].0, ServiceConfig::COOLDOWN);
    }
}
