//! Target configuration.
//!
//! Configurations can be created programmatically or loaded from JSON, YAML
//! or TOML files.
//!
//! # Examples
//!
//! ```rust
//! use advice_core::config::{AdviceConfig, NamingStyle};
//!
//! let config: AdviceConfig = toml::from_str("naming = \"camel\"\ntrace_calls = true").unwrap();
//! assert_eq!(config.naming, NamingStyle::Camel);
//! assert!(config.trace_calls);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AdviceResult, ConfigError};

/// Naming style for the operation members installed by the mixin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStyle {
    /// `hijack_before`, `hijack_after`
    #[default]
    Snake,
    /// `hijackBefore`, `hijackAfter`
    Camel,
}

/// Per-target configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// Naming style of installed operation members
    pub naming: NamingStyle,

    /// Emit a trace event for every call made through the target
    pub trace_calls: bool,
}

impl AdviceConfig {
    /// Load configuration from a file.
    ///
    /// Supports JSON, YAML, and TOML formats based on file extension.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> AdviceResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_e| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let invalid = |reason: String| ConfigError::InvalidFormat {
            path: path.display().to_string(),
            reason,
        };

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?
            }
            Some("toml") => toml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
            _ => {
                return Err(invalid(
                    "Unsupported file format. Use .json, .yaml, or .toml".to_string(),
                )
                .into())
            }
        };

        Ok(config)
    }

    /// Save configuration to a file, picking the format from the extension.
    pub fn to_file(&self, path: impl AsRef<std::path::Path>) -> AdviceResult<()> {
        let path = path.as_ref();
        let invalid = |reason: String| ConfigError::InvalidFormat {
            path: path.display().to_string(),
            reason,
        };

        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                serde_json::to_string_pretty(self).map_err(|e| invalid(e.to_string()))?
            }
            Some("yaml") | Some("yml") => {
                serde_yaml::to_string(self).map_err(|e| invalid(e.to_string()))?
            }
            Some("toml") => toml::to_string(self).map_err(|e| invalid(e.to_string()))?,
            _ => {
                return Err(invalid(
                    "Unsupported file format. Use .json, .yaml, or .toml".to_string(),
                )
                .into())
            }
        };

        std::fs::write(path, content)?;

        Ok(())
    }
}
