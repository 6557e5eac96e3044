// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              KitError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+------+------+
//!   |      |      |       |      |      |      |
//!   v      v      v       v      v      v      v
//!  Git  Config Process   Fs  Progress Prompt   Io
//!  Box   Box    Box     Box    Box     Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git      CommandFailed, CloneFailed, DestinationExists
//!   Config   ParseError, MissingKey, InvalidValue
//!   Process  ExecutableNotFound, SpawnFailed, Timeout
//!   Fs       NotFound, PermissionDenied, PathEscapesRoot
//!   Progress SinkUnavailable
//!   Prompt   NoChoices, EndOfInput, TooManyAttempts
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`KitError`].
pub type KitResult<T> = std::result::Result<T, KitError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum KitError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Progress display error.
    #[error("progress error: {0}")]
    Progress(#[from] Box<ProgressError>),

    /// Interactive prompt error.
    #[error("prompt error: {0}")]
    Prompt(#[from] Box<PromptError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for KitError {
                fn from(err: $error) -> Self {
                    KitError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    ProgressError => Progress,
    PromptError => Prompt,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Clone destination already exists and may not be replaced.
    #[error("clone destination already exists: {path}")]
    DestinationExists { path: String },

    /// Operation was cancelled before the git process finished.
    #[error("git {command} was interrupted")]
    Interrupted { command: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Unknown tool requested.
    #[error("unknown tool '{0}' (not built in and not configured)")]
    UnknownTool(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a non-zero code.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process timed out and was killed.
    #[error("process '{command}' timed out after {timeout_ms} ms")]
    Timeout { command: String, timeout_ms: u64 },

    /// Failed to wait on or talk to the process.
    #[error("i/o error while running process '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Empty argument vector.
    #[error("empty command line")]
    EmptyCommand,
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Relative path leaves its root directory.
    #[error("path '{path}' escapes the repository root")]
    PathEscapesRoot { path: String },

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an I/O error raised while touching `path`.
    #[must_use]
    pub fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        let path = path.display().to_string();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::IoError { path, source },
        }
    }
}

// --- Progress Errors ---

/// Display sink errors.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The sink could not display the update.
    #[error("progress sink unavailable: {source}")]
    SinkUnavailable {
        #[source]
        source: std::io::Error,
    },
}

// --- Prompt Errors ---

/// Interactive prompt errors.
#[derive(Debug, Error)]
pub enum PromptError {
    /// A selection menu was given no choices.
    #[error("no choices to select from")]
    NoChoices,

    /// Input ended before an answer was given.
    #[error("input ended while waiting for '{field}'")]
    EndOfInput { field: String },

    /// Every attempt at a required answer was rejected.
    #[error("no valid answer for '{field}'")]
    TooManyAttempts { field: String },

    /// Reading or writing the terminal failed.
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
