//! Configuration loading for the record packet module.
//!
//! Configuration is loaded from a TOML file. Every key is optional; an
//! empty file yields [`Config::default`].

use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Packet routing configuration.
    #[serde(default)]
    pub packet: PacketConfig,
    /// Payload validation policy.
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Packet routing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PacketConfig {
    /// Port this module is bound to (default: "record").
    #[serde(default = "default_port")]
    pub port: String,
    /// Relative packet timeout in seconds (default: 600).
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: u64,
}

/// Title/content policy applied to inbound packets.
///
/// The defaults accept anything; the only fixed rule is that record ids
/// parse as unsigned integers, which is checked separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValidationConfig {
    /// Maximum title length in bytes (default: unbounded).
    #[serde(default)]
    pub max_title_len: Option<usize>,
    /// Maximum content length in bytes (default: unbounded).
    #[serde(default)]
    pub max_content_len: Option<usize>,
    /// Reject empty titles (default: false).
    #[serde(default)]
    pub require_title: bool,
}

fn default_port() -> String {
    "record".to_string()
}

fn default_timeout_secs() -> u64 {
    600 // 10 minutes
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            default_timeout_secs: default_timeout_secs(),
        }
    }
}

impl PacketConfig {
    /// Absolute timeout timestamp (nanoseconds) for a packet sent at
    /// `block_time_nanos`.
    pub fn timeout_timestamp(&self, block_time_nanos: u64) -> u64 {
        block_time_nanos.saturating_add(self.default_timeout_secs.saturating_mul(1_000_000_000))
    }
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}
