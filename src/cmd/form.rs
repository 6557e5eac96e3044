// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Form command implementation.

use std::io::Write;

use crate::error::Result;
use crate::prompt::{FormAnswers, TerminalSecret, fill_form};

/// Main handler for the form command.
///
/// # Errors
///
/// Returns an error if input ends early or the terminal cannot be used.
pub fn run_form_command() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    let answers = fill_form(
        &mut std::io::stdin().lock(),
        &mut stdout,
        &mut TerminalSecret,
    )?;
    write_summary(&mut stdout, &answers)?;
    Ok(())
}

/// Writes the collected answers. The password is never written.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_summary<W: Write>(out: &mut W, answers: &FormAnswers) -> std::io::Result<()> {
    writeln!(out, "Form completed:")?;
    writeln!(out, "  Username:  {}", answers.username)?;
    writeln!(out, "  File path: {}", answers.file_path.display())?;
    out.flush()
}
