// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config command implementation.

use crate::cli::config::ConfigArgs;
use crate::cli::global::GlobalOptions;
use crate::cmd::config_loader;
use crate::config::Config;
use crate::error::Result;

/// Main handler for the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn run_config_command(args: &ConfigArgs, config: &Config, global: &GlobalOptions) -> Result<()> {
    if args.files {
        run_files_command(&config_loader(global)?.format_loaded_files());
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        run_options_command(config);
    }
    Ok(())
}

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_files_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}
