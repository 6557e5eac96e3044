// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process builder with configuration options.
//!
//! ```text
//! ProcessBuilder
//!  • new/which/from_argv
//!  • args/env/flag/timeout/name
//!  • stderr_flags, capture_stdout/stderr/output
//!  • forward_stdout/forward_stderr (live segments over mpsc)
//!
//! ProcessFlags: ALLOW_FAILURE, QUIET_FAILURE
//! StreamFlags:  FORWARD_TO_LOG (default), KEEP_IN_STRING
//!               empty = not read, stdio is /dev/null
//! ```

use bitflags::bitflags;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::error::ProcessError;

/// Static cache for executable paths resolved via `which`.
static EXECUTABLE_CACHE: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();

/// Get the executable cache, initializing if needed.
fn exe_cache() -> &'static RwLock<BTreeMap<String, PathBuf>> {
    EXECUTABLE_CACHE.get_or_init(|| RwLock::new(BTreeMap::new()))
}

bitflags! {
    /// Flags controlling process execution behavior.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u32 {
        /// Don't fail if the process exits with a non-zero code
        const ALLOW_FAILURE = 0x01;
        /// Don't log stderr at error level when the process fails
        const QUIET_FAILURE = 0x02;
    }
}

bitflags! {
    /// Flags controlling stream handling for stdout/stderr.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StreamFlags: u32 {
        /// Forward output to tracing logs
        const FORWARD_TO_LOG = 0x01;
        /// Keep output in a string
        const KEEP_IN_STRING = 0x04;
    }
}

impl Default for StreamFlags {
    fn default() -> Self {
        Self::FORWARD_TO_LOG
    }
}

/// Output from a completed process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
    interrupted: bool,
}

impl ProcessOutput {
    /// Creates a new `ProcessOutput`.
    #[must_use]
    pub const fn new(exit_code: i32, stdout: String, stderr: String, interrupted: bool) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            interrupted,
        }
    }

    /// Returns the process exit code (0 = success, -1 = killed by signal).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Returns captured stdout (if `KEEP_IN_STRING` was set).
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Returns captured stderr (if `KEEP_IN_STRING` was set).
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Returns whether the process was interrupted by cancellation.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Returns true if the process exited successfully (code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Configuration for a stream (stdout or stderr).
#[derive(Debug, Clone)]
pub(super) struct StreamConfig {
    flags: StreamFlags,
    forward: Option<mpsc::Sender<String>>,
}

impl StreamConfig {
    pub(super) const fn flags(&self) -> StreamFlags {
        self.flags
    }

    pub(super) const fn set_flags(&mut self, flags: StreamFlags) {
        self.flags = flags;
    }

    pub(super) fn forward(&self) -> Option<mpsc::Sender<String>> {
        self.forward.clone()
    }

    fn set_forward(&mut self, tx: mpsc::Sender<String>) {
        self.forward = Some(tx);
    }

    /// Whether the stream must be read at all.
    pub(super) fn needs_reader(&self) -> bool {
        self.forward.is_some()
            || self
                .flags
                .intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            flags: StreamFlags::FORWARD_TO_LOG,
            forward: None,
        }
    }
}

/// Builder for configuring and running a process.
#[derive(Debug)]
pub struct ProcessBuilder {
    /// Path to the executable
    program: PathBuf,
    /// Command-line arguments
    args: Vec<String>,
    /// Extra environment variables (inherited environment is kept)
    env: BTreeMap<String, String>,
    /// Process flags
    flags: ProcessFlags,
    /// Stdout configuration
    stdout: StreamConfig,
    /// Stderr configuration
    stderr: StreamConfig,
    /// Display name for logging
    name: Option<String>,
    /// Timeout for the process
    timeout: Option<Duration>,
}

impl ProcessBuilder {
    /// Creates a new `ProcessBuilder` for the given program.
    ///
    /// The program can be an absolute path, relative path, or just the executable name.
    /// A bare name is resolved via PATH by the OS at spawn time.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: BTreeMap::new(),
            flags: ProcessFlags::empty(),
            stdout: StreamConfig::default(),
            stderr: StreamConfig::default(),
            name: None,
            timeout: None,
        }
    }

    /// Creates a `ProcessBuilder` from an argument vector (`argv[0]` is the program).
    ///
    /// The program is resolved with [`ProcessBuilder::which`].
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::EmptyCommand` for an empty vector and
    /// `ProcessError::ExecutableNotFound` if the program cannot be resolved.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Result<Self, ProcessError> {
        let (program, rest) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;
        Ok(Self::which(program.as_ref())?.args(rest.iter().map(|a| a.as_ref())))
    }

    /// Creates a `ProcessBuilder` after resolving the program via PATH.
    ///
    /// Results are cached for subsequent lookups of the same program.
    ///
    /// # Errors
    ///
    /// - `ProcessError::SpawnFailed` if `program` is a path to a file that is
    ///   not executable.
    /// - `ProcessError::ExecutableNotFound` otherwise.
    pub fn which(program: &str) -> Result<Self, ProcessError> {
        Self::find(program)
            .map(|path| Self::new(path).name(display_stem(program)))
            .ok_or_else(|| lookup_error(program))
    }

    /// Finds the full path to an executable in PATH.
    ///
    /// Only successful lookups are cached, so a tool installed while the
    /// program runs is picked up on the next call.
    fn find(program: &str) -> Option<PathBuf> {
        {
            let cache = exe_cache()
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(path) = cache.get(program) {
                return Some(path.clone());
            }
        }

        which::which(program).ok().inspect(|path| {
            let mut cache = exe_cache()
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            cache.insert(program.to_string(), path.clone());
        })
    }

    /// Adds an argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Adds multiple arguments to the command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string_lossy().into_owned());
        }
        self
    }

    /// Sets an environment variable on top of the inherited environment.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Adds a process flag.
    #[must_use]
    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.flags |= flag;
        self
    }

    /// Configures stderr handling.
    #[must_use]
    pub const fn stderr_flags(mut self, flags: StreamFlags) -> Self {
        self.stderr.set_flags(flags);
        self
    }

    /// Convenience: capture stdout to string.
    #[must_use]
    pub const fn capture_stdout(mut self) -> Self {
        self.stdout.set_flags(StreamFlags::KEEP_IN_STRING);
        self
    }

    /// Convenience: capture stderr to string.
    #[must_use]
    pub const fn capture_stderr(mut self) -> Self {
        self.stderr.set_flags(StreamFlags::KEEP_IN_STRING);
        self
    }

    /// Convenience: capture both stdout and stderr to strings.
    #[must_use]
    pub const fn capture_output(self) -> Self {
        self.capture_stdout().capture_stderr()
    }

    /// Sends every stdout segment to `tx` as soon as it is read.
    ///
    /// Segments are separated by `\n` or `\r`; empty segments are skipped.
    #[must_use]
    pub fn forward_stdout(mut self, tx: mpsc::Sender<String>) -> Self {
        self.stdout.set_forward(tx);
        self
    }

    /// Sends every stderr segment to `tx` as soon as it is read.
    ///
    /// `git --progress` redraws its counters with `\r`, each redraw arrives as
    /// its own segment.
    #[must_use]
    pub fn forward_stderr(mut self, tx: mpsc::Sender<String>) -> Self {
        self.stderr.set_forward(tx);
        self
    }

    /// Sets a display name for logging.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a timeout for the process. The child is killed when it expires.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Returns a reference to the program path.
    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    pub(super) fn args_slice(&self) -> &[String] {
        &self.args
    }

    pub(super) const fn environment(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub(super) const fn process_flags(&self) -> ProcessFlags {
        self.flags
    }

    pub(super) const fn stdout_config(&self) -> &StreamConfig {
        &self.stdout
    }

    pub(super) const fn stderr_config(&self) -> &StreamConfig {
        &self.stderr
    }

    pub(super) fn name_override(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(super) const fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Error for a failed lookup. A path naming an existing file that is not
/// executable is a permission problem, not a missing tool.
fn lookup_error(program: &str) -> ProcessError {
    let path = Path::new(program);
    let has_dir = path.parent().is_some_and(|p| !p.as_os_str().is_empty());
    if has_dir && path.is_file() {
        return ProcessError::SpawnFailed {
            command: program.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "file is not executable",
            ),
        };
    }
    ProcessError::ExecutableNotFound {
        name: program.to_string(),
    }
}

/// File stem of a program name or path, used as the default display name.
fn display_stem(program: &str) -> String {
    Path::new(program).file_stem().map_or_else(
        || program.to_string(),
        |s| s.to_string_lossy().into_owned(),
    )
}
