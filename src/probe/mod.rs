// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool availability and authentication probes.
//!
//! ```text
//! ToolSpec { install: Stage, auth: Option<Stage> }
//!              |
//!              v
//!   Prober::probe_tool(spec)
//!     install stage --> CommandRunner::run(argv, timeout)
//!                         Err(ProcessError) --> NotFound / SpawnDenied / TimedOut
//!                         exit != 0         --> NonZeroExit(code)
//!                         !matcher          --> PredicateMismatch
//!     installed?  no  --> authenticated = Unknown
//!                 yes --> auth stage (if any) --> Authenticated / Unauthenticated
//!              |
//!              v
//!        ProbeResult
//! ```
//!
//! Every failure collapses to `installed = false`; the reason is kept on the
//! result and logged, never returned as an error.

pub mod tools;


use futures_util::future::{BoxFuture, join_all};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::ProcessError;

pub use tools::{OutputMatcher, Stage, ToolSpec};

/// Default per-command timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a probe stage did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Executable absent from the environment.
    NotFound,
    /// The OS refused to start the executable.
    SpawnDenied,
    /// The command exited with a non-zero status.
    NonZeroExit(i32),
    /// Exit status was 0 but the output did not match.
    PredicateMismatch,
    /// The command did not finish in time and was killed.
    TimedOut,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("executable not found"),
            Self::SpawnDenied => f.write_str("spawn denied"),
            Self::NonZeroExit(code) => write!(f, "exited with code {code}"),
            Self::PredicateMismatch => f.write_str("unexpected output"),
            Self::TimedOut => f.write_str("timed out"),
        }
    }
}

impl From<&ProcessError> for FailureReason {
    fn from(err: &ProcessError) -> Self {
        match err {
            ProcessError::ExecutableNotFound { .. } | ProcessError::EmptyCommand => Self::NotFound,
            ProcessError::SpawnFailed { .. } | ProcessError::Io { .. } => Self::SpawnDenied,
            ProcessError::NonZeroExit { code, .. } => Self::NonZeroExit(*code),
            ProcessError::Timeout { .. } => Self::TimedOut,
        }
    }
}

/// Outcome of the authentication stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Authentication {
    Authenticated,
    Unauthenticated,
    /// Not installed, or the tool has no authentication stage.
    #[default]
    Unknown,
}

/// Result of probing one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    tool: String,
    installed: bool,
    authenticated: Authentication,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<FailureReason>,
}

impl ProbeResult {
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    #[must_use]
    pub const fn installed(&self) -> bool {
        self.installed
    }

    #[must_use]
    pub const fn authenticated(&self) -> Authentication {
        self.authenticated
    }

    /// Why the last failing stage failed, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<FailureReason> {
        self.reason
    }
}

/// Captured result of one finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    #[must_use]
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }
}

/// Runs a command to completion and captures its output.
///
/// A non-zero exit is *not* an error at this level; only failures to run the
/// command at all (missing executable, refused spawn, timeout) are.
pub trait CommandRunner: Send + Sync {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
        timeout: Duration,
    ) -> BoxFuture<'a, Result<CommandOutput, ProcessError>>;
}

/// Production runner on top of [`ProcessBuilder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
        timeout: Duration,
    ) -> BoxFuture<'a, Result<CommandOutput, ProcessError>> {
        Box::pin(async move {
            let output = ProcessBuilder::from_argv(argv)?
                .capture_output()
                .flag(ProcessFlags::ALLOW_FAILURE | ProcessFlags::QUIET_FAILURE)
                .timeout(timeout)
                .run()
                .await?;
            Ok(CommandOutput::new(
                output.exit_code(),
                output.stdout(),
                output.stderr(),
            ))
        })
    }
}

/// Runs `argv` and checks it exited with 0 and `predicate` holds on its output.
///
/// # Errors
///
/// Returns the [`FailureReason`] of the failed check.
pub async fn probe_command<R, P>(
    runner: &R,
    argv: &[String],
    timeout: Duration,
    predicate: P,
) -> Result<(), FailureReason>
where
    R: CommandRunner + ?Sized,
    P: Fn(&CommandOutput) -> bool,
{
    let output = runner.run(argv, timeout).await.map_err(|e| {
        debug!(command = %argv.join(" "), error = %e, "probe command failed to run");
        FailureReason::from(&e)
    })?;

    if output.exit_code != 0 {
        return Err(FailureReason::NonZeroExit(output.exit_code));
    }
    if !predicate(&output) {
        return Err(FailureReason::PredicateMismatch);
    }
    Ok(())
}

/// Probes tools through a [`CommandRunner`].
#[derive(Debug, Clone)]
pub struct Prober<R> {
    runner: R,
    timeout: Duration,
}

impl Default for Prober<ProcessRunner> {
    fn default() -> Self {
        Self::new(ProcessRunner)
    }
}

impl<R: CommandRunner> Prober<R> {
    pub const fn new(runner: R) -> Self {
        Self {
            runner,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn run_stage(&self, tool: &str, stage: &Stage) -> Result<(), FailureReason> {
        let result = probe_command(&self.runner, stage.argv(), self.timeout, |output| {
            stage.matcher().matches(output)
        })
        .await;
        if let Err(reason) = result {
            debug!(tool, command = %stage.argv().join(" "), %reason, "probe stage failed");
        }
        result
    }

    /// Runs the install stage, then the auth stage if the tool is installed.
    pub async fn probe_tool(&self, spec: &ToolSpec) -> ProbeResult {
        let install = self.run_stage(spec.name(), spec.install()).await;
        let installed = install.is_ok();

        let (authenticated, reason) = match (install, spec.auth()) {
            (Err(reason), _) => (Authentication::Unknown, Some(reason)),
            (Ok(()), None) => (Authentication::Unknown, None),
            (Ok(()), Some(auth)) => match self.run_stage(spec.name(), auth).await {
                Ok(()) => (Authentication::Authenticated, None),
                Err(reason) => (Authentication::Unauthenticated, Some(reason)),
            },
        };

        info!(
            tool = spec.name(),
            installed,
            authenticated = ?authenticated,
            "probe finished"
        );

        ProbeResult {
            tool: spec.name().to_string(),
            installed,
            authenticated,
            reason,
        }
    }

    /// Probes every tool concurrently. Results keep the order of `specs`.
    pub async fn probe_all(&self, specs: &[ToolSpec]) -> Vec<ProbeResult> {
        join_all(specs.iter().map(|spec| self.probe_tool(spec))).await
    }
}
