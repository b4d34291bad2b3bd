// SPDX-License-Identifier: MIT

//! Shell configuration, loaded from a small TOML file with `[system]` and
//! `[display]` sections. Every key is optional.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{path}: {source}")]
    Read { path: String, source: std::io::Error },

    #[error("{path}: {source}")]
    Parse { path: String, source: toml::de::Error },
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    /// Startup script, relative to the shell root.
    #[serde(default = "default_rcfile")]
    pub rcfile: String,
    /// History file, relative to the shell root.
    #[serde(default = "default_historyfile")]
    pub historyfile: String,
    /// Print error detail when a script fails.
    #[serde(default)]
    pub traceback: bool,
    /// On first up-arrow, jump to the first entry matching the typed prefix.
    #[serde(default)]
    pub ipython_style_history_search: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            rcfile: default_rcfile(),
            historyfile: default_historyfile(),
            traceback: false,
            ipython_style_history_search: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Bound on the history ring.
    #[serde(default = "default_history_max")]
    pub history_max: usize,
    /// Bound on retained terminal output, for UIs that want one.
    #[serde(default = "default_buffer_max")]
    pub buffer_max: usize,
    /// Most completion candidates shown before "More than N possibilities".
    #[serde(default = "default_auto_completion_max")]
    pub auto_completion_max: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            history_max: default_history_max(),
            buffer_max: default_buffer_max(),
            auto_completion_max: default_auto_completion_max(),
        }
    }
}

fn default_rcfile() -> String {
    ".stashrc".to_string()
}

fn default_historyfile() -> String {
    ".stash_history".to_string()
}

fn default_history_max() -> usize {
    30
}

fn default_buffer_max() -> usize {
    150
}

fn default_auto_completion_max() -> usize {
    30
}

impl Config {
    pub fn parse_str(text: &str, origin: &str) -> Result<Config, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse { path: origin.to_string(), source })
    }

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_str(&text, &path.display().to_string())
    }

    /// Load a config file if present, falling back to defaults.
    pub fn load_or_default(path: &Path) -> Config {
        if path.is_file() {
            match Self::load(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unreadable config file");
                    Config::default()
                }
            }
        } else {
            Config::default()
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
