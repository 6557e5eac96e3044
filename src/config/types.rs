// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config: GlobalConfig, ProbeConfig, CloneConfig, ProgressConfig, PromptConfig
//! tools:  name → ToolConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LogLevel;
use crate::progress::sink::SinkStyle;

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console (stderr) output (0-6).
    pub log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. No file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write the log file as JSON lines.
    pub json_log: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::WARN,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            json_log: false,
        }
    }
}

/// Tool probe options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// Per-command timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl ProbeConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `fetch` clone options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloneConfig {
    /// Where repositories are cloned.
    pub directory: PathBuf,
    /// Clone with `--depth 1`.
    pub shallow: bool,
    /// Replace an existing destination once the clone has succeeded.
    /// A `--dest` other than `directory` must be an earlier clone or empty
    /// unless `--force` is given.
    pub replace_existing: bool,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            directory: std::env::temp_dir().join("repo"),
            shallow: false,
            replace_existing: true,
        }
    }
}

/// Progress display options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressConfig {
    /// Upper end of the projected scale.
    pub scale_max: u64,
    pub style: SinkStyle,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            scale_max: 100,
            style: SinkStyle::default(),
        }
    }
}

/// Interactive prompt options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptConfig {
    /// Menu entries for `select`.
    pub choices: Vec<String>,
    /// Number of simulated items processed after a selection.
    pub items: u64,
    /// Delay per simulated item in milliseconds.
    pub item_delay_ms: u64,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            choices: ["Option A", "Option B", "Option C", "Option D"]
                .map(String::from)
                .to_vec(),
            items: 10,
            item_delay_ms: 500,
        }
    }
}

impl PromptConfig {
    #[must_use]
    pub const fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay_ms)
    }
}

/// Stream a probe marker is searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStream {
    #[default]
    Stdout,
    Stderr,
    Either,
}

/// A `[tools.<name>]` probe definition.
///
/// ```toml
/// [tools.node]
/// command = ["node", "--version"]
/// marker = "v"
///
/// [tools.gh]
/// display_name = "GitHub CLI"
/// command = ["gh", "--version"]
/// marker = "gh version"
/// auth_command = ["gh", "auth", "status"]
/// auth_target = "GitHub"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub command: Vec<String>,
    /// Text the output must contain. Any output is accepted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    pub stream: MarkerStream,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_target: Option<String>,
}
