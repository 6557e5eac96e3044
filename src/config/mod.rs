// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for devkit.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. devkit.toml (cwd, optional)
//! 3. --config (repeatable)
//! 4. DEVKIT_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! DEVKIT_PROBE__TIMEOUT_SECS=3   → probe.timeout_secs = 3
//! DEVKIT_PROGRESS__STYLE=plain   → progress.style = "plain"
//! DEVKIT_CLONE__DIRECTORY=/work  → clone.directory = "/work"
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU64;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::logging::LogConfig;
use crate::probe::tools::ToolCatalog;

use loader::ConfigLoader;
use types::{CloneConfig, GlobalConfig, ProbeConfig, ProgressConfig, PromptConfig, ToolConfig};

/// Name of the optional configuration file in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "devkit.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "DEVKIT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub probe: ProbeConfig,
    pub clone: CloneConfig,
    pub progress: ProgressConfig,
    pub prompt: PromptConfig,
    /// Extra probeable tools, keyed by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tools: BTreeMap<String, ToolConfig>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use devkit::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("devkit.toml")
    ///     .with_env_prefix("DEVKIT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values the types alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first invalid value.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |section: &str, key: &str, message: &str| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.progress.scale_max == 0 {
            return Err(invalid("progress", "scale_max", "must be greater than 0"));
        }
        if self.probe.timeout_secs == 0 {
            return Err(invalid("probe", "timeout_secs", "must be greater than 0"));
        }
        if self.prompt.choices.is_empty() {
            return Err(invalid("prompt", "choices", "must not be empty"));
        }
        if self.clone.directory.as_os_str().is_empty() {
            return Err(invalid("clone", "directory", "must not be empty"));
        }
        // Surfaces malformed [tools.*] tables at load time
        ToolCatalog::new(&self.tools)?;
        Ok(())
    }

    /// The projection scale.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `progress.scale_max` is 0.
    pub fn scale_max(&self) -> std::result::Result<NonZeroU64, ConfigError> {
        NonZeroU64::new(self.progress.scale_max).ok_or_else(|| ConfigError::InvalidValue {
            section: "progress".to_string(),
            key: "scale_max".to_string(),
            message: "must be greater than 0".to_string(),
        })
    }

    /// Built-in and configured tools.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a malformed `[tools.<name>]` table.
    pub fn tool_catalog(&self) -> std::result::Result<ToolCatalog, ConfigError> {
        ToolCatalog::new(&self.tools)
    }

    /// Logging setup derived from `[global]`.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.global.log_level)
            .with_file_level(self.global.file_log_level)
            .maybe_with_log_file(
                self.global
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string()),
            )
            .with_json_file(self.global.json_log)
            .build()
    }

    /// Format configuration options for display.
    ///
    /// One aligned `key = value` line per option, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_section_options(&mut options);
        self.format_tools_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.log_level".into(),
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(log_file) = &self.global.log_file {
            options.insert("global.log_file".into(), log_file.display().to_string());
        }
        options.insert("global.json_log".into(), self.global.json_log.to_string());
    }

    fn format_section_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "probe.timeout_secs".into(),
            self.probe.timeout_secs.to_string(),
        );
        options.insert(
            "clone.directory".into(),
            self.clone.directory.display().to_string(),
        );
        options.insert("clone.shallow".into(), self.clone.shallow.to_string());
        options.insert(
            "clone.replace_existing".into(),
            self.clone.replace_existing.to_string(),
        );
        options.insert(
            "progress.scale_max".into(),
            self.progress.scale_max.to_string(),
        );
        options.insert(
            "progress.style".into(),
            format!("{:?}", self.progress.style).to_lowercase(),
        );
        options.insert(
            "prompt.choices".into(),
            self.prompt.choices.join(", "),
        );
        options.insert("prompt.items".into(), self.prompt.items.to_string());
        options.insert(
            "prompt.item_delay_ms".into(),
            self.prompt.item_delay_ms.to_string(),
        );
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        for (name, tool) in &self.tools {
            options.insert(format!("tools.{name}.command"), tool.command.join(" "));
            if let Some(auth) = &tool.auth_command {
                options.insert(format!("tools.{name}.auth_command"), auth.join(" "));
            }
        }
    }
}
