//! Broker configuration — one explicit struct instead of process-wide constants.
//!
//! Loaded once from YAML at startup and handed to the execution dispatcher
//! and assistant relay constructors. Every field has a default, so an empty
//! file (or no file at all) yields a broker pointed at local services.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors from loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Top-level broker configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrokerConfig {
    pub server: ServerConfig,
    pub judge: JudgeConfig,
    pub assistant: AssistantConfig,
}

/// Where the broker's own HTTP surface listens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Execution backend (Judge0) settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JudgeConfig {
    pub base_url: String,
    /// Sent as `X-Auth-Token` when the Judge0 instance requires one.
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:2358".into(),
            auth_token: None,
            timeout_secs: 30,
        }
    }
}

impl JudgeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Generation backend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssistantConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            model: "llama3".into(),
            timeout_secs: 120,
        }
    }
}

impl AssistantConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl BrokerConfig {
    /// Parse a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document for a struct; treat it as defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }
}
