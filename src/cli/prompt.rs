// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive command arguments.

use clap::Args;

/// Arguments for the select command.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectArgs {
    /// Number of items to process (overrides prompt.items).
    #[arg(long, value_name = "N")]
    pub items: Option<u64>,

    /// Delay per item in milliseconds (overrides prompt.item_delay_ms).
    #[arg(long = "delay-ms", value_name = "MS")]
    pub delay_ms: Option<u64>,
}
