// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fetch command: clone a repository and print one file.

use anyhow::{Context, bail};
use std::io::Write;
use tracing::info;

use crate::cli::repo::FetchArgs;
use crate::cmd::{cancel_on_ctrl_c, projector};
use crate::config::Config;
use crate::error::Result;
use crate::git::{CloneOptions, clone_with_progress, read_repo_file};
use crate::probe::{Prober, tools};

/// Progress label for the clone.
pub const CLONE_LABEL: &str = "Cloning repository";

/// Main handler for the fetch command.
///
/// # Errors
///
/// Returns an error if git is not installed, the clone fails or is
/// interrupted, or the file cannot be read.
pub async fn run_fetch_command(args: &FetchArgs, config: &Config) -> Result<()> {
    require_git(config).await?;

    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| config.clone.directory.clone());
    let options = CloneOptions {
        branch: args.branch.clone(),
        shallow: args.shallow || config.clone.shallow,
        replace_existing: config.clone.replace_existing && !args.keep_existing,
        // clone.directory belongs to devkit; a user --dest is only cleared
        // when it holds an earlier clone, unless forced.
        replace_any: args.dest.is_none() || args.force,
    };

    let mut projector = projector(config, CLONE_LABEL)?;
    clone_with_progress(&args.url, &dest, &options, &mut projector, cancel_on_ctrl_c())
        .await
        .with_context(|| format!("failed to fetch {}", args.url))?;
    info!(dest = %dest.display(), "repository cloned");

    let content = read_repo_file(&dest, &args.file).await?;
    write_file_report(&mut std::io::stdout().lock(), &args.file, content.as_deref())?;
    Ok(())
}

/// Fails unless git passes its probe.
async fn require_git(config: &Config) -> Result<()> {
    let prober = Prober::default().with_timeout(config.probe.timeout());
    let result = prober.probe_tool(&tools::git()).await;
    if !result.installed() {
        match result.reason() {
            Some(reason) => bail!("Git is not installed ({reason})"),
            None => bail!("Git is not installed"),
        }
    }
    Ok(())
}

/// Writes the file contents, or a not-found line when `content` is `None`.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_file_report<W: Write>(
    out: &mut W,
    file: &str,
    content: Option<&str>,
) -> std::io::Result<()> {
    match content {
        Some(content) => {
            writeln!(out, "\nContents of {file}:")?;
            write!(out, "{content}")?;
            if !content.ends_with('\n') {
                writeln!(out)?;
            }
        }
        None => writeln!(out, "File {file} not found in the repository.")?,
    }
    out.flush()
}
