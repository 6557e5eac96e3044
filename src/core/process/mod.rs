// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::which("git")
//!   .args() .env() .capture_output() .timeout()
//!   .run() / .run_with_cancellation()
//!       --> tokio::process::Command
//!           stream stdout/stderr (segments on \n and \r)
//!           timeout / cancel --> kill + reap
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
mod runner;

use crate::error::ProcessError;

/// Result type for process execution.
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;
