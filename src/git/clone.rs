// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `git clone` with projected progress.
//!
//! ```text
//! check destination (absent | replaceable | refuse)
//!        |
//!        v
//! git clone --progress [--depth 1] [--branch B] URL <parent>/.devkit-clone-XXXX
//!        | stderr split on \r and \n
//!        v
//! GitProgress::parse --> Receiving objects --> Projector::observe
//!                    --> other phases      --> debug log
//!                    --> not progress      --> kept for error messages
//!        |
//!        v
//! exit 0 --> remove old DEST, rename staging dir to DEST, Projector::finish
//! else   --> staging dir dropped, DEST untouched
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::progress::GitProgress;
use super::{failure_message, git_command, run_streaming, segment_channel};
use crate::error::{FsError, GitError, KitResult};
use crate::progress::{DisplaySink, Projector};

/// Prefix of the sibling directory a clone is staged in.
const STAGING_PREFIX: &str = ".devkit-clone-";

/// Options for [`clone_with_progress`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    /// Branch or tag to check out instead of the remote HEAD.
    pub branch: Option<String>,
    /// Clone with `--depth 1`.
    pub shallow: bool,
    /// Replace an existing destination that is a git work tree or empty.
    pub replace_existing: bool,
    /// With `replace_existing`, also replace any other existing file or directory.
    pub replace_any: bool,
}

fn fs_error(path: &Path) -> impl FnOnce(std::io::Error) -> FsError + '_ {
    move |e| FsError::from_io(path, e)
}

/// Whether `dest` is a directory holding a git work tree, or an empty directory.
async fn is_previous_clone(dest: &Path) -> KitResult<bool> {
    let metadata = tokio::fs::metadata(dest).await.map_err(fs_error(dest))?;
    if !metadata.is_dir() {
        return Ok(false);
    }
    if tokio::fs::try_exists(dest.join(".git"))
        .await
        .map_err(fs_error(dest))?
    {
        return Ok(true);
    }
    let mut entries = tokio::fs::read_dir(dest).await.map_err(fs_error(dest))?;
    Ok(entries.next_entry().await.map_err(fs_error(dest))?.is_none())
}

/// Returns whether `dest` exists; errors if it exists and may not be replaced.
async fn check_destination(dest: &Path, options: &CloneOptions) -> KitResult<bool> {
    if !tokio::fs::try_exists(dest).await.map_err(fs_error(dest))? {
        return Ok(false);
    }
    let replaceable =
        options.replace_existing && (options.replace_any || is_previous_clone(dest).await?);
    if !replaceable {
        return Err(GitError::DestinationExists {
            path: dest.display().to_string(),
        }
        .into());
    }
    Ok(true)
}

/// Creates the staging directory next to `dest`, so the final rename stays on
/// one filesystem.
async fn staging_dir(dest: &Path) -> KitResult<TempDir> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&parent)
        .await
        .map_err(fs_error(&parent))?;
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(&parent)
        .map_err(fs_error(&parent))?;
    Ok(staging)
}

/// Swaps the finished clone into place.
async fn install_clone(staging: TempDir, dest: &Path, replace: bool) -> KitResult<()> {
    if replace {
        debug!(path = %dest.display(), "removing existing clone destination");
        let metadata = tokio::fs::symlink_metadata(dest)
            .await
            .map_err(fs_error(dest))?;
        let removed = if metadata.is_dir() {
            tokio::fs::remove_dir_all(dest).await
        } else {
            tokio::fs::remove_file(dest).await
        };
        removed.map_err(fs_error(dest))?;
    }

    let staged = staging.keep();
    if let Err(e) = tokio::fs::rename(&staged, dest).await {
        let _ = tokio::fs::remove_dir_all(&staged).await;
        return Err(FsError::from_io(dest, e).into());
    }
    Ok(())
}

/// Clones `url` into `dest`, driving `projector` from git's download counter.
///
/// Only the `Receiving objects` phase feeds the projector; git restarts its
/// counters for every phase and the projector keeps the display monotonic
/// regardless.
///
/// The clone runs in a sibling staging directory. An existing `dest` is only
/// removed once the clone has succeeded.
///
/// # Errors
///
/// - `ProcessError::ExecutableNotFound` if git is not installed.
/// - `GitError::DestinationExists` if `dest` exists and may not be replaced.
/// - `FsError` if the staging directory cannot be created or moved into place.
/// - `GitError::CloneFailed` if git exits with a non-zero status.
/// - `GitError::Interrupted` if `cancel` fires first.
/// - `ProgressError` if the display sink fails.
pub async fn clone_with_progress<S: DisplaySink>(
    url: &str,
    dest: &Path,
    options: &CloneOptions,
    projector: &mut Projector<S>,
    cancel: CancellationToken,
) -> KitResult<()> {
    let replace = check_destination(dest, options).await?;
    let mut builder = git_command()?.arg("clone").arg("--progress");
    let staging = staging_dir(dest).await?;

    let (tx, rx) = segment_channel();
    if options.shallow {
        builder = builder.arg("--depth").arg("1");
    }
    if let Some(branch) = &options.branch {
        builder = builder.arg("--branch").arg(branch);
    }
    let builder = builder.arg(url).arg(staging.path()).forward_stderr(tx);

    info!(url, path = %dest.display(), shallow = options.shallow, "cloning repository");

    let mut messages = Vec::new();
    let output = run_streaming(builder, rx, cancel, "clone", |segment| {
        match GitProgress::parse(&segment) {
            Some(progress) if progress.is_download() => {
                projector.observe_sample(progress.sample())?;
            }
            Some(progress) => {
                debug!(phase = ?progress.phase, current = progress.current, total = ?progress.total, "clone progress");
            }
            None => messages.push(segment),
        }
        Ok(())
    })
    .await?;

    if !output.success() {
        return Err(GitError::CloneFailed {
            url: url.to_string(),
            message: failure_message(&messages, output.exit_code()),
        }
        .into());
    }

    install_clone(staging, dest, replace).await?;
    projector.finish()?;
    info!(url, path = %dest.display(), "repository cloned");
    Ok(())
}
