// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations on top of the git CLI.
//!
//! ```text
//!   clone.rs                    remote.rs
//!   git clone --progress        git ls-remote --heads
//!        | stderr segments           | stdout lines
//!        v                           v
//!   progress.rs (GitProgress)   parse_heads()
//!        |                           |
//!        +-------> Projector <-------+
//!
//!   files.rs   read_repo_file(root, relative)
//! ```
//!
//! Every git child gets `GIT_TERMINAL_PROMPT=0` and `GCM_INTERACTIVE=never`,
//! so a missing credential fails the command instead of blocking on a prompt.

pub mod clone;
pub mod files;
pub mod progress;
pub mod remote;


use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{GitError, KitResult};

pub use clone::{CloneOptions, clone_with_progress};
pub use files::read_repo_file;
pub use progress::{GitPhase, GitProgress};
pub use remote::{list_remote_branches, parse_heads};

/// Capacity of the channel carrying output segments from the reader task.
const SEGMENT_CHANNEL_CAPACITY: usize = 64;

/// Resolves git and applies the non-interactive environment.
///
/// # Errors
///
/// Returns `ProcessError::ExecutableNotFound` if git is not in PATH.
pub(crate) fn git_command() -> KitResult<ProcessBuilder> {
    Ok(ProcessBuilder::which("git")?
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GCM_INTERACTIVE", "never")
        .flag(ProcessFlags::ALLOW_FAILURE))
}

/// Runs `builder`, handing every forwarded segment to `on_segment` while the
/// child is still running.
///
/// The channel is drained concurrently with the wait, so a chatty child can
/// never block on a full pipe.
pub(crate) async fn run_streaming<F>(
    builder: ProcessBuilder,
    mut rx: mpsc::Receiver<String>,
    cancel: CancellationToken,
    command: &str,
    mut on_segment: F,
) -> KitResult<ProcessOutput>
where
    F: FnMut(String) -> KitResult<()>,
{
    let run = builder.run_with_cancellation(cancel);
    tokio::pin!(run);

    let result = loop {
        tokio::select! {
            Some(segment) = rx.recv() => on_segment(segment)?,
            result = &mut run => break result,
        }
    };
    while let Ok(segment) = rx.try_recv() {
        on_segment(segment)?;
    }

    let output = result?;
    if output.is_interrupted() {
        return Err(GitError::Interrupted {
            command: command.to_string(),
        }
        .into());
    }
    Ok(output)
}

/// Creates the segment channel used by [`run_streaming`].
pub(crate) fn segment_channel() -> (mpsc::Sender<String>, mpsc::Receiver<String>) {
    mpsc::channel(SEGMENT_CHANNEL_CAPACITY)
}

/// Last meaningful line of git's error output, for error messages.
pub(crate) fn failure_message(lines: &[String], exit_code: i32) -> String {
    lines
        .iter()
        .rev()
        .find(|line| line.starts_with("fatal:") || line.starts_with("error:"))
        .or_else(|| lines.last())
        .map_or_else(|| format!("exit code {exit_code}"), Clone::clone)
}
