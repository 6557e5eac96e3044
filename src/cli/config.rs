// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config command arguments.

use clap::Args;

/// Arguments for the config command.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Prints the effective configuration as JSON.
    #[arg(long, conflicts_with = "files")]
    pub json: bool,

    /// Lists the configuration files that were loaded.
    #[arg(long)]
    pub files: bool,
}
