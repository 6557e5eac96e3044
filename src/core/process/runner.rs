// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, env, stdio, kill_on_drop
//!              |
//!              v
//!          spawn()  --> NotFound: ExecutableNotFound
//!              |        other:    SpawnFailed
//!              v
//!         run_child()
//!              |
//!              v
//!    validate exit_code
//!    (skip if ALLOW_FAILURE or interrupted)
//!              |
//!              v
//!       ProcessOutput
//! ```

use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::ProcessResult;
use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamConfig};
use crate::error::ProcessError;

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The executable does not exist or cannot be spawned.
    /// - The process exits with a non-zero code (and `ALLOW_FAILURE` is not set).
    /// - The configured timeout expires (the child is killed first).
    pub async fn run(self) -> ProcessResult<ProcessOutput> {
        self.run_with_cancellation(CancellationToken::new()).await
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// When the token is cancelled the child is killed and the returned
    /// output has `interrupted = true`.
    ///
    /// # Errors
    ///
    /// Same as [`ProcessBuilder::run`]; an interrupted process is not an error.
    pub async fn run_with_cancellation(
        self,
        token: CancellationToken,
    ) -> ProcessResult<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if token.is_cancelled() {
            return Ok(ProcessOutput::new(-1, String::new(), String::new(), true));
        }

        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();

        let mut child = command.spawn().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ProcessError::ExecutableNotFound {
                    name: self.program().display().to_string(),
                }
            } else {
                ProcessError::SpawnFailed {
                    command: cmd_line.clone(),
                    source,
                }
            }
        })?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &cmd_line, &mut child, &token).await?;

        if !output.is_interrupted()
            && !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE)
            && !output.success()
        {
            if !output.stderr().is_empty()
                && !self.process_flags().contains(ProcessFlags::QUIET_FAILURE)
            {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: cmd_line,
                code: output.exit_code(),
            });
        }

        trace!(
            process = %name,
            exit_code = output.exit_code(),
            interrupted = output.is_interrupted(),
            "completed"
        );
        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        command.args(self.args_slice());

        for (key, value) in self.environment() {
            command.env(key, value);
        }

        // Probes and git must never wait on a prompt
        command.stdin(Stdio::null());

        command.stdout(Self::stdio_for(self.stdout_config()));
        command.stderr(Self::stdio_for(self.stderr_config()));

        command.kill_on_drop(true);

        command
    }

    /// Pipes a stream only when something reads it.
    fn stdio_for(config: &StreamConfig) -> Stdio {
        if config.needs_reader() {
            Stdio::piped()
        } else {
            Stdio::null()
        }
    }
}
