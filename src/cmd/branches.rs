// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branches command implementation.

use std::io::Write;

use crate::cli::repo::BranchesArgs;
use crate::cmd::{cancel_on_ctrl_c, projector};
use crate::config::Config;
use crate::error::Result;
use crate::git::list_remote_branches;

/// Progress label for `git ls-remote`.
pub const BRANCHES_LABEL: &str = "Fetching branches";

/// Main handler for the branches command.
///
/// # Errors
///
/// Returns an error if git is missing, `git ls-remote` fails, or it is
/// interrupted.
pub async fn run_branches_command(args: &BranchesArgs, config: &Config) -> Result<()> {
    let mut projector = projector(config, BRANCHES_LABEL)?;
    let branches = list_remote_branches(&args.url, &mut projector, cancel_on_ctrl_c()).await?;
    write_branches(&mut std::io::stdout().lock(), &branches)?;
    Ok(())
}

/// Writes `Branches:` and one branch per line.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_branches<W: Write, S: AsRef<str>>(out: &mut W, branches: &[S]) -> std::io::Result<()> {
    writeln!(out, "Branches:")?;
    for branch in branches {
        writeln!(out, "{}", branch.as_ref())?;
    }
    out.flush()
}
