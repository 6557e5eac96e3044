// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Probe command arguments.

use clap::Args;

/// Arguments for the probe command.
#[derive(Debug, Clone, Default, Args)]
pub struct ProbeArgs {
    /// Tools to probe (built in: docker, aws, git). Probes every known tool if empty.
    #[arg(value_name = "TOOL", conflicts_with = "all")]
    pub tools: Vec<String>,

    /// Probes every built-in and configured tool.
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Prints results as JSON.
    #[arg(long)]
    pub json: bool,

    /// Fails when a probed tool is not installed.
    #[arg(long)]
    pub require: bool,
}

impl ProbeArgs {
    /// Tool names to probe; empty means all of them.
    #[must_use]
    pub fn selection(&self) -> &[String] {
        if self.all { &[] } else { &self.tools }
    }
}
