//! Console core configuration
//!
//! Connection settings for the backend API. Defaults suit local
//! development; deployments load a small YAML file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the console core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the backend API. Endpoint paths are joined beneath it.
    pub api_base: String,

    /// Timeout for plain JSON requests, in seconds.
    pub request_timeout_secs: u64,

    /// Timeout for multipart document uploads, in seconds. Uploads move
    /// real file bytes, so they get more room than JSON calls.
    pub upload_timeout_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:5000/api".to_string(),
            request_timeout_secs: 30,
            upload_timeout_secs: 120,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a YAML file. Missing keys keep their
    /// defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {:?}", path))
    }

    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn upload_timeout_secs(mut self, secs: u64) -> Self {
        self.upload_timeout_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ConsoleConfig::default();
        assert!(config.api_base.starts_with("http"));
        assert!(config.upload_timeout_secs > config.request_timeout_secs);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: ConsoleConfig =
            serde_yaml::from_str("api_base: https://console.example.com/api\n").unwrap();
        assert_eq!(config.api_base, "https://console.example.com/api");
        assert_eq!(
            config.request_timeout_secs,
            ConsoleConfig::default().request_timeout_secs
        );
    }
}
