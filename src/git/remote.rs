// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote branch listing.
//!
//! `git ls-remote --heads` prints no total while it runs, so the display is
//! marked busy, lines are collected, and they are projected one per branch
//! once the count is known.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{failure_message, git_command, run_streaming, segment_channel};
use crate::core::process::builder::StreamFlags;
use crate::error::{GitError, KitResult};
use crate::progress::{DisplaySink, Projector};

const HEADS_PREFIX: &str = "refs/heads/";

/// Extracts branch names from `git ls-remote --heads` output, in output order.
///
/// Each line is `<sha>\t<ref>`; lines without a tab are skipped.
pub fn parse_heads<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| line.as_ref().split_once('\t'))
        .map(|(_, reference)| {
            let reference = reference.trim();
            reference
                .strip_prefix(HEADS_PREFIX)
                .unwrap_or(reference)
                .to_string()
        })
        .collect()
}

/// Lists the branch names of the repository at `url`.
///
/// # Errors
///
/// - `ProcessError::ExecutableNotFound` if git is not installed.
/// - `GitError::CommandFailed` if git exits with a non-zero status.
/// - `GitError::Interrupted` if `cancel` fires first.
/// - `ProgressError` if the display sink fails.
pub async fn list_remote_branches<S: DisplaySink>(
    url: &str,
    projector: &mut Projector<S>,
    cancel: CancellationToken,
) -> KitResult<Vec<String>> {
    let (tx, rx) = segment_channel();
    let builder = git_command()?
        .args(["ls-remote", "--heads", url])
        .forward_stdout(tx)
        .stderr_flags(StreamFlags::KEEP_IN_STRING);

    info!(url, "listing remote branches");
    projector.busy()?;

    let mut lines = Vec::new();
    let output = run_streaming(builder, rx, cancel, "ls-remote", |line| {
        debug!(line = %line, "ls-remote");
        lines.push(line);
        Ok(())
    })
    .await?;

    if !output.success() {
        let stderr: Vec<String> = output.stderr().lines().map(str::to_string).collect();
        return Err(GitError::CommandFailed {
            command: format!("git ls-remote --heads {url}"),
            message: failure_message(&stderr, output.exit_code()),
        }
        .into());
    }

    let branches = parse_heads(&lines);
    let total = u64::try_from(branches.len()).unwrap_or(u64::MAX);
    for done in 1..=total {
        projector.observe(done, Some(total))?;
    }
    projector.finish()?;

    info!(url, count = branches.len(), "remote branches listed");
    Ok(branches)
}
