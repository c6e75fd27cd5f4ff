// File: src/config.rs
// Purpose: Dispatcher configuration parsing from a TOML `[dispatch]` table

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Dispatcher behavior switches
///
/// ```toml
/// [dispatch]
/// head_fallback = true
/// dedup_allowed_methods = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Retry an unmatched `HEAD` request as `GET` (default: true)
    #[serde(default = "default_true")]
    pub head_fallback: bool,

    /// Report each allowed method once on a 405 (default: false)
    #[serde(default = "default_false")]
    pub dedup_allowed_methods: bool,
}

/// Top-level document shape; only the `[dispatch]` table is read
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    dispatch: DispatchConfig,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            head_fallback: default_true(),
            dedup_allowed_methods: default_false(),
        }
    }
}

impl DispatchConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let file: ConfigFile =
            toml::from_str(content).context("Failed to parse dispatch configuration")?;

        Ok(file.dispatch)
    }

    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
