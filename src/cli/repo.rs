// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the fetch command.
#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    /// Repository URL.
    #[arg(value_name = "URL")]
    pub url: String,

    /// File to print, relative to the repository root.
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Clone destination (overrides clone.directory).
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Branch to check out.
    #[arg(short = 'b', long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Fetches only the latest commit.
    #[arg(long)]
    pub shallow: bool,

    /// Fails instead of deleting an existing destination.
    #[arg(long)]
    pub keep_existing: bool,

    /// Replaces a --dest that is not a git repository.
    #[arg(long, conflicts_with = "keep_existing")]
    pub force: bool,
}

/// Arguments for the branches command.
#[derive(Debug, Clone, Args)]
pub struct BranchesArgs {
    /// Repository URL.
    #[arg(value_name = "URL")]
    pub url: String,
}
