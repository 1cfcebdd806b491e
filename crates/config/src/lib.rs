//! Rebind Configuration Module
//!
//! This module provides configuration types for contract registries and the
//! dispatch proxies created from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid TOML for [`RegistryConfig`].
    #[error("failed to parse registry config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read registry config: {0}")]
    Io(#[from] std::io::Error),
}

/// How a bulk rebind picks candidate members from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    /// Receiver-less members of a type.
    #[default]
    Static,
    /// Receiver-taking members, bound against the source instance.
    Instance,
}

impl fmt::Display for BindMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindMode::Static => write!(f, "static"),
            BindMode::Instance => write!(f, "instance"),
        }
    }
}

impl FromStr for BindMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" => Ok(BindMode::Static),
            "instance" | "object" => Ok(BindMode::Instance),
            _ => Err(format!("Unknown bind mode: {}", s)),
        }
    }
}

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Record every skipped candidate in mass-bind reports.
    pub capture_skipped: bool,
    /// Emit a trace event for every dispatch of an undefined method.
    pub trace_dispatch: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capture_skipped: true,
            trace_dispatch: false,
        }
    }
}

impl RegistryConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Enables or disables skipped-candidate capture.
    pub fn with_capture_skipped(mut self, capture: bool) -> Self {
        self.capture_skipped = capture;
        self
    }

    /// Enables or disables dispatch tracing.
    pub fn with_trace_dispatch(mut self, trace: bool) -> Self {
        self.trace_dispatch = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert!(config.capture_skipped);
        assert!(!config.trace_dispatch);
    }

    #[test]
    fn test_bind_mode_round_trip() {
        for mode in [BindMode::Static, BindMode::Instance] {
            assert_eq!(mode.to_string().parse::<BindMode>(), Ok(mode));
        }
        assert_eq!("OBJECT".parse::<BindMode>(), Ok(BindMode::Instance));
        assert!("dynamic".parse::<BindMode>().is_err());
    }

    #[test]
    fn test_accessor_name_is_not_configurable() {
        let err = RegistryConfig::from_toml_str("reserved_accessor = \"owner\"\n")
            .expect_err("unknown key");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
