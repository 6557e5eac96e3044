// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE       ← Additional config files (can repeat)
//! --no-default-config ← Skip ./devkit.toml
//! --log-level N       ← Console verbosity (0-6)
//! --file-log-level N  ← File verbosity (defaults to --log-level)
//! --log-file FILE     ← global.log_file override
//! --progress STYLE    ← progress.style override
//! --set KEY=VAL       ← Direct config override
//!
//! Precedence: CLI flags > --set > env > --config > devkit.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::progress::sink::SinkStyle;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append, global = true)]
    pub configs: Vec<PathBuf>,

    /// Does not load `devkit.toml` from the current directory.
    #[arg(long = "no-default-config", global = true)]
    pub no_default_config: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6), global = true
    )]
    pub log_level: Option<u8>,

    /// File log level, defaults to --log-level.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6), global = true
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// How progress is displayed.
    #[arg(long = "progress", value_name = "STYLE", value_enum, global = true)]
    pub progress: Option<SinkStyle>,

    /// Sets an option, such as 'probe.timeout_secs=3'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_override, action = clap::ArgAction::Append, global = true)]
    pub options: Vec<(String, String)>,
}

/// Splits `section.key=value`.
fn parse_override(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() || !key.contains('.') {
        return Err(format!("expected a 'section.key' name, got '{key}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    ///
    /// Dedicated flags come after `--set`, so they win.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(String, String)> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(("global.log_level".into(), level.to_string()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level".into(), level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file".into(), path.display().to_string()));
        }

        if let Some(style) = self.progress {
            let name = match style {
                SinkStyle::Bar => "bar",
                SinkStyle::Log => "log",
                SinkStyle::Plain => "plain",
                SinkStyle::None => "none",
            };
            overrides.push(("progress.style".into(), name.to_string()));
        }

        overrides
    }
}
