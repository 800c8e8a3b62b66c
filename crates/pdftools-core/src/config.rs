//! Page configuration
//!
//! Every field has a default, so an empty object (or no configuration at all)
//! reproduces the stock page behavior.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Runtime settings for the interaction layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// Prefix prepended to every endpoint path (default: same origin)
    #[serde(default)]
    pub api_base: String,
    /// How long a notification stays visible (default: 3000)
    #[serde(default = "default_notification_timeout_ms")]
    pub notification_timeout_ms: u64,
    /// Download name used when the response names no file (default: "output.pdf")
    #[serde(default = "default_download_name")]
    pub default_download_name: String,
    /// Largest file accepted by the preflight check (default: 50 MiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Run client-side checks before sending a form (default: true)
    #[serde(default = "default_validate_before_submit")]
    pub validate_before_submit: bool,
    /// One of trace, debug, info, warn, error, off (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_notification_timeout_ms() -> u64 {
    3000
}

fn default_download_name() -> String {
    "output.pdf".to_string()
}

fn default_max_upload_bytes() -> u64 {
    50 * 1024 * 1024
}

fn default_validate_before_submit() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            notification_timeout_ms: default_notification_timeout_ms(),
            default_download_name: default_download_name(),
            max_upload_bytes: default_max_upload_bytes(),
            validate_before_submit: default_validate_before_submit(),
            log_level: default_log_level(),
        }
    }
}

impl UiConfig {
    /// Parse and validate configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, names an unknown field, or
    /// fails [`UiConfig::validate`].
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notification_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "notification_timeout_ms must be positive".to_string(),
            ));
        }
        if self.default_download_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_download_name must not be empty".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }

    /// Full request URL for an endpoint path
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), endpoint)
    }
}
